//! # vigil-network
//!
//! 감시 대상 서비스에 대한 HTTP 헬스 프로브.
//! reqwest 클라이언트로 GET 요청을 보내 응답 시간과 생존 여부를 측정하고,
//! 지연 시간 히스토리와 최근 에러 FIFO를 유지한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use vigil_network::health::HealthProbe;
//!
//! let mut probe = HealthProbe::new("http://localhost:8000", Duration::from_secs(10), 60, 100)?;
//! let record = probe.check_health().await;
//! ```

pub mod health;
