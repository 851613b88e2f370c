//! 임계값 경고 평가.
//!
//! 세 조건은 서로 독립적으로 평가되며, 조건이 유지되는 동안 매 라운드
//! 다시 경고한다 (쿨다운 없음).

use tracing::{error, warn};
use vigil_core::config::AlertConfig;
use vigil_core::models::alert::{AlertInfo, AlertLevel, AlertType};
use vigil_core::models::snapshot::Snapshot;

/// 스냅샷에 대한 경고 목록
///
/// 수집 불가(`None`)인 메트릭은 경고 대상이 아니다.
pub fn evaluate(snapshot: &Snapshot, config: &AlertConfig) -> Vec<AlertInfo> {
    let mut alerts = Vec::new();

    if let Some(cpu) = snapshot.system.cpu_percent {
        if cpu > config.cpu_threshold {
            alerts.push(AlertInfo::new(
                AlertType::HighCpu,
                AlertLevel::Warning,
                format!("CPU 사용률이 {cpu:.1}%입니다"),
            ));
        }
    }

    if let Some(memory) = snapshot.system.memory_percent {
        if memory > config.memory_threshold {
            alerts.push(AlertInfo::new(
                AlertType::HighMemory,
                AlertLevel::Warning,
                format!("메모리 사용률이 {memory:.1}%입니다"),
            ));
        }
    }

    if !snapshot.application.is_alive {
        alerts.push(AlertInfo::new(
            AlertType::ApplicationDown,
            AlertLevel::Error,
            "애플리케이션이 응답하지 않습니다",
        ));
    }

    alerts
}

/// 경고를 로그 이벤트로 발행
pub fn emit(alerts: &[AlertInfo]) {
    for alert in alerts {
        match alert.level {
            AlertLevel::Warning => warn!(alert = ?alert.alert_type, "{}", alert.message),
            AlertLevel::Error => error!(alert = ?alert.alert_type, "{}", alert.message),
        }
    }
}
