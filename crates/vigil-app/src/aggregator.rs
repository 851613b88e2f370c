//! 라운드 집계기.
//!
//! 한 라운드에서 호스트 샘플러, 헬스 프로브, 프로세스 탐색기를 순서대로
//! 호출해 스냅샷을 만들고, 저장하고, 요약을 렌더링하고, 경고를 평가한다.
//! 개별 소스와 저장 실패는 라운드를 중단시키지 않는다.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error};
use vigil_core::config::AlertConfig;
use vigil_core::models::alert::AlertInfo;
use vigil_core::models::snapshot::{ApplicationSection, ProcessBlock, Snapshot, SystemSection};
use vigil_core::models::system::StaticInfo;
use vigil_core::ports::storage::SnapshotStore;
use vigil_monitor::host::HostSampler;
use vigil_monitor::locator::ProcessLocator;
use vigil_network::health::HealthProbe;

use crate::{alerts, render};

/// 한 라운드의 결과
#[derive(Debug, Clone)]
pub struct RoundReport {
    /// 이번 라운드 스냅샷
    pub snapshot: Snapshot,
    /// 렌더링된 터미널 요약
    pub summary: String,
    /// 발행된 경고
    pub alerts: Vec<AlertInfo>,
    /// 저장 성공 여부
    pub persisted: bool,
}

/// 텔레메트리 집계기
pub struct TelemetryAggregator {
    host: HostSampler,
    probe: HealthProbe,
    locator: ProcessLocator,
    store: Arc<dyn SnapshotStore>,
    alert_config: AlertConfig,
    last_snapshot: Option<Snapshot>,
}

impl TelemetryAggregator {
    pub fn new(
        host: HostSampler,
        probe: HealthProbe,
        locator: ProcessLocator,
        store: Arc<dyn SnapshotStore>,
        alert_config: AlertConfig,
    ) -> Self {
        Self {
            host,
            probe,
            locator,
            store,
            alert_config,
            last_snapshot: None,
        }
    }

    /// 정적 호스트 정보
    pub fn static_info(&self) -> StaticInfo {
        self.host.static_info()
    }

    /// 마지막으로 만든 스냅샷
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// 세 소스에서 수집해 스냅샷 조립 (저장/경고 없음)
    pub async fn collect(&mut self) -> Snapshot {
        // 1. 호스트 메트릭 (세 값은 같은 샘플링 시점)
        let reading = self.host.update_history().await;

        // 2. 헬스 프로브
        let health = self.probe.check_health().await;

        // 3. 프로세스 (열거 순서상 첫 매칭만)
        let process = self.locator.locate().await;
        if process.is_none() {
            debug!("감시 대상 프로세스 없음: {}", self.locator.name_filter());
        }

        Snapshot {
            timestamp: Utc::now(),
            system: SystemSection {
                cpu_percent: reading.cpu_percent,
                memory_percent: reading.memory_percent(),
                disk_percent: reading.disk_percent(),
                cpu_history: self.host.cpu_history().values(),
                memory_history: self.host.memory_history().values(),
                disk_history: self.host.disk_history().values(),
            },
            application: ApplicationSection {
                is_alive: health.is_alive,
                status_code: health.status_code,
                response_time: health.response_time,
                avg_response_time: self.probe.average_response_time(),
                error_rate: self.probe.error_rate(),
                recent_errors: self.probe.recent_errors(),
            },
            process: ProcessBlock::from(process),
        }
    }

    /// 한 라운드 실행: 수집 → 저장 → 렌더링 → 경고
    pub async fn collect_and_report(&mut self) -> RoundReport {
        let snapshot = self.collect().await;

        // 4. 저장 (실패해도 라운드는 계속)
        let persisted = match self.store.save(&snapshot).await {
            Ok(()) => true,
            Err(e) => {
                error!("스냅샷 저장 실패: {e}");
                false
            }
        };

        let summary = render::format_snapshot(&snapshot);

        // 5. 경고
        let alerts = alerts::evaluate(&snapshot, &self.alert_config);
        alerts::emit(&alerts);

        self.last_snapshot = Some(snapshot.clone());

        RoundReport {
            snapshot,
            summary,
            alerts,
            persisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        aggregator_with, refused_url, FakeProcessTable, FakeSystemMonitor,
    };
    use tempfile::TempDir;
    use vigil_core::models::alert::AlertType;
    use vigil_storage::snapshot_file::SnapshotFileStorage;

    #[tokio::test]
    async fn no_process_still_persists() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(SnapshotFileStorage::new(temp.path().join("stats.json")));
        let mut aggregator = aggregator_with(
            FakeSystemMonitor::new(20.0),
            FakeProcessTable::new(vec![]),
            &refused_url(),
            store.clone(),
        );

        let report = aggregator.collect_and_report().await;

        assert!(report.persisted);
        assert!(report.snapshot.process.is_empty());
        assert!(!report.snapshot.application.is_alive);
        assert_eq!(report.snapshot.application.error_rate, 1.0);
        assert_eq!(report.snapshot.application.recent_errors.len(), 1);

        let saved = store.load().await.unwrap().unwrap();
        assert_eq!(saved, report.snapshot);
        assert_eq!(aggregator.last_snapshot(), Some(&report.snapshot));
    }

    #[tokio::test]
    async fn high_cpu_raises_warning_without_blocking() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(SnapshotFileStorage::new(temp.path().join("stats.json")));
        let system = FakeSystemMonitor::new(95.0);
        let cpu = system.cpu_handle();
        let mut aggregator = aggregator_with(
            system,
            FakeProcessTable::new(vec![]),
            &refused_url(),
            store,
        );

        let first = aggregator.collect_and_report().await;
        assert!(first
            .alerts
            .iter()
            .any(|a| a.alert_type == AlertType::HighCpu));

        *cpu.lock().unwrap() = 10.0;
        let second = aggregator.collect_and_report().await;
        assert!(second.persisted);
        assert!(!second
            .alerts
            .iter()
            .any(|a| a.alert_type == AlertType::HighCpu));
        assert_eq!(second.snapshot.system.cpu_history, vec![95.0, 10.0]);
    }

    #[tokio::test]
    async fn killed_process_empties_block() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(SnapshotFileStorage::new(temp.path().join("stats.json")));
        let table = FakeProcessTable::with_server(4242);
        let handle = table.handle();
        let mut aggregator = aggregator_with(
            FakeSystemMonitor::new(20.0),
            table,
            &refused_url(),
            store,
        );

        let first = aggregator.collect_and_report().await;
        assert_eq!(first.snapshot.process.info().map(|p| p.pid), Some(4242));
        assert!(first.summary.contains("PID: 4242"));

        handle.lock().unwrap().clear();
        let second = aggregator.collect_and_report().await;
        assert!(second.snapshot.process.is_empty());
        assert!(second.persisted);
        assert!(!second.summary.contains("PID:"));
    }

    #[tokio::test]
    async fn persistence_failure_keeps_round() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(SnapshotFileStorage::new(
            temp.path().join("missing").join("stats.json"),
        ));
        let mut aggregator = aggregator_with(
            FakeSystemMonitor::new(20.0),
            FakeProcessTable::new(vec![]),
            &refused_url(),
            store,
        );

        let report = aggregator.collect_and_report().await;
        assert!(!report.persisted);
        assert!(report.summary.contains("시스템 리소스:"));
        assert!(aggregator.last_snapshot().is_some());
    }

    #[tokio::test]
    async fn live_service_is_alive() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let store = Arc::new(SnapshotFileStorage::new(temp.path().join("stats.json")));
        let mut aggregator = aggregator_with(
            FakeSystemMonitor::new(20.0),
            FakeProcessTable::new(vec![]),
            &server.url(),
            store,
        );

        let report = aggregator.collect_and_report().await;
        assert!(report.snapshot.application.is_alive);
        assert_eq!(report.snapshot.application.status_code, 200);
        assert_eq!(report.snapshot.application.error_rate, 0.0);
        assert!(report.alerts.is_empty());
        assert!(report.summary.starts_with("애플리케이션 상태: 🟢"));
    }
}
