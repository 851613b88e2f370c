//! # vigil-app
//!
//! 모니터링 루프 오케스트레이션.
//! 어댑터 crate를 조합해 라운드 단위로 스냅샷을 만들고,
//! 저장/렌더링/경고를 처리하며 종료 신호까지 반복한다.
//!
//! ## 모듈
//! - `aggregator`: 라운드 집계 (TelemetryAggregator)
//! - `alerts`: 임계값 경고 평가
//! - `render`: 터미널 요약 포맷
//! - `scheduler`: 고정 간격 라운드 스케줄러
//! - `lifecycle`: 종료 신호 및 OS 시그널 처리

pub mod aggregator;
pub mod alerts;
pub mod lifecycle;
pub mod render;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod test_support;
