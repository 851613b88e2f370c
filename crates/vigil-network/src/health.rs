//! HTTP 헬스 프로브.
//!
//! 설정된 URL에 GET 요청을 1회 보내 응답 시간과 생존 여부를 기록한다.
//! 응답을 받은 경우(상태 코드 무관) 지연 시간 히스토리에 추가하고,
//! 네트워크 수준 실패는 에러 FIFO에만 기록한다.

use std::time::{Duration, Instant};
use tracing::{debug, warn};
use vigil_core::error::CoreError;
use vigil_core::models::health::{ErrorRecord, HealthRecord};
use vigil_core::models::history::HistoryBuffer;

/// 에러율 계산 분모 (최근 100회 기준)
const ERROR_RATE_WINDOW: f64 = 100.0;

/// HTTP 헬스 프로브
pub struct HealthProbe {
    client: reqwest::Client,
    url: String,
    latency: HistoryBuffer<f64>,
    errors: HistoryBuffer<ErrorRecord>,
}

impl HealthProbe {
    /// 새 프로브 생성
    ///
    /// `timeout`은 요청 전체(연결 + 응답)에 적용된다.
    pub fn new(
        url: &str,
        timeout: Duration,
        history_capacity: usize,
        error_capacity: usize,
    ) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        Ok(Self {
            client,
            url: url.trim().to_string(),
            latency: HistoryBuffer::new(history_capacity),
            errors: HistoryBuffer::new(error_capacity),
        })
    }

    /// 프로브 대상 URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// 헬스 체크 1회 실행
    pub async fn check_health(&mut self) -> HealthRecord {
        let started = Instant::now();

        match self.client.get(&self.url).send().await {
            Ok(resp) => {
                let elapsed = started.elapsed().as_secs_f64();
                let status_code = resp.status().as_u16();
                self.latency.append(elapsed);

                debug!(
                    "헬스 체크 {}: {} ({:.1}ms)",
                    self.url,
                    status_code,
                    elapsed * 1000.0
                );
                HealthRecord::responded(status_code, elapsed)
            }
            Err(e) => {
                let message = describe_error(&e);
                warn!("헬스 체크 실패 {}: {message}", self.url);
                self.errors.append(ErrorRecord::now(message.clone()));
                HealthRecord::failed(message)
            }
        }
    }

    /// 평균 응답 시간 (초, 히스토리가 비어있으면 0)
    pub fn average_response_time(&self) -> f64 {
        self.latency.mean()
    }

    /// 에러율
    ///
    /// (에러 FIFO 점유 수 ÷ 100) × 100. 수치상 점유 수와 같으며
    /// FIFO 용량으로 상한이 정해진다.
    pub fn error_rate(&self) -> f64 {
        // 정수 점유 수가 그대로 나오도록 곱셈을 먼저 한다
        self.errors.len() as f64 * 100.0 / ERROR_RATE_WINDOW
    }

    /// 최근 에러 기록 (오래된 것부터)
    pub fn recent_errors(&self) -> Vec<ErrorRecord> {
        self.errors.values()
    }

    pub fn latency_history(&self) -> &HistoryBuffer<f64> {
        &self.latency
    }
}

/// reqwest 에러를 사람이 읽을 수 있는 메시지로 변환
fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("요청 타임아웃: {e}")
    } else if e.is_connect() {
        format!("연결 실패: {e}")
    } else {
        format!("요청 실패: {e}")
    }
}
