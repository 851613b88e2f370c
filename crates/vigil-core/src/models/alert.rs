//! 임계값 경고 모델.

use chrono::{DateTime, Utc};

/// 경고 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    /// CPU 과부하
    HighCpu,
    /// 메모리 과다 사용
    HighMemory,
    /// 애플리케이션 무응답
    ApplicationDown,
}

/// 경고 심각도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Warning,
    Error,
}

/// 라운드별 경고
#[derive(Debug, Clone, PartialEq)]
pub struct AlertInfo {
    /// 경고 유형
    pub alert_type: AlertType,
    /// 심각도
    pub level: AlertLevel,
    /// 경고 메시지
    pub message: String,
    /// 발생 시각
    pub timestamp: DateTime<Utc>,
}

impl AlertInfo {
    /// 현재 시각으로 경고 생성
    pub fn new(alert_type: AlertType, level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            alert_type,
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
