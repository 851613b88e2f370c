//! 헬스 체크 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 에러 FIFO 기본 용량 (최근 100건)
pub const DEFAULT_ERROR_CAPACITY: usize = 100;

/// 단일 프로브 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// HTTP 상태 코드 (네트워크 실패 시 0)
    pub status_code: u16,
    /// 응답 시간 (초, 네트워크 실패 시 0)
    pub response_time: f64,
    /// 200 응답 여부
    pub is_alive: bool,
    /// 네트워크 실패 메시지
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthRecord {
    /// 응답을 받은 경우
    pub fn responded(status_code: u16, response_time: f64) -> Self {
        Self {
            status_code,
            response_time,
            is_alive: status_code == 200,
            error: None,
        }
    }

    /// 네트워크 수준 실패
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            response_time: 0.0,
            is_alive: false,
            error: Some(message.into()),
        }
    }
}

/// 프로브 실패 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// 발생 시각
    pub time: DateTime<Utc>,
    /// 실패 메시지
    pub error: String,
}

impl ErrorRecord {
    /// 현재 시각으로 기록 생성
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            error: message.into(),
        }
    }
}
