//! Vigil 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 이 타입을 그대로 반환한다.
//! 라운드 단위의 일시적 실패는 각 컴포넌트 내부에서 흡수되고,
//! 시작 단계의 치명적 실패만 바이너리까지 전파된다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// 네트워크 에러 (연결 실패, 타임아웃, DNS)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 개별 메트릭 수집 불가 (해당 필드만 열화 처리)
    #[error("{metric} 수집 불가: {reason}")]
    Unavailable {
        /// 메트릭 이름 (예: "cpu", "disk")
        metric: String,
        /// 실패 사유
        reason: String,
    },

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 메트릭 수집 불가 에러 생성 헬퍼
    pub fn unavailable(metric: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            metric: metric.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_message() {
        let err = CoreError::unavailable("disk", "마운트 지점 없음: /data");
        assert_eq!(err.to_string(), "disk 수집 불가: 마운트 지점 없음: /data");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
