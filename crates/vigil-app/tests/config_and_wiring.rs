//! 설정 및 DI 와이어링 통합 테스트.
//!
//! AppConfig → 어댑터 생성 검증.

use std::sync::Arc;
use tempfile::TempDir;
use vigil_app::aggregator::TelemetryAggregator;
use vigil_app::scheduler::{Scheduler, SchedulerConfig, SchedulerState};
use vigil_core::config::AppConfig;
use vigil_core::config_manager::ConfigManager;
use vigil_monitor::host::HostSampler;
use vigil_monitor::locator::ProcessLocator;
use vigil_monitor::process::ProcessTracker;
use vigil_monitor::system::SysInfoMonitor;
use vigil_network::health::HealthProbe;
use vigil_storage::snapshot_file::SnapshotFileStorage;

#[test]
fn config_defaults_are_valid() {
    let config = AppConfig::default_config();

    // 프로브 설정
    assert!(config.probe.url.starts_with("http://"));
    assert!(config.probe.timeout_ms > 0);

    // 샘플링 설정
    assert_eq!(config.monitor.interval_secs, 5);
    assert_eq!(config.monitor.history_capacity, 60);
    assert_eq!(config.monitor.error_capacity, 100);

    // 경고 임계값
    assert_eq!(config.alerts.cpu_threshold, 90.0);
    assert_eq!(config.alerts.memory_threshold, 90.0);

    assert!(config.validate().is_ok());
}

#[test]
fn config_duration_conversions() {
    let config = AppConfig::default_config();

    assert_eq!(config.interval().as_secs(), config.monitor.interval_secs);
    assert_eq!(
        config.probe_timeout().as_millis(),
        u128::from(config.probe.timeout_ms)
    );
}

#[test]
fn config_file_feeds_adapters() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{"probe":{"url":"http://127.0.0.1:9","timeout_ms":500},"monitor":{"history_capacity":10}}"#,
    )
    .unwrap();

    let config = ConfigManager::with_path(config_path).unwrap().get();
    assert!(config.validate().is_ok());

    let probe = HealthProbe::new(
        &config.probe.url,
        config.probe_timeout(),
        config.monitor.history_capacity,
        config.monitor.error_capacity,
    )
    .unwrap();
    assert_eq!(probe.url(), "http://127.0.0.1:9");
    assert_eq!(probe.latency_history().capacity(), 10);
}

#[tokio::test]
async fn all_adapters_instantiate_from_config() {
    let temp = TempDir::new().unwrap();
    let mut config = AppConfig::default_config();
    config.storage.stats_file = temp.path().join("monitor_stats.json");

    let host = HostSampler::new(
        Arc::new(SysInfoMonitor::new(
            config.monitor.disk_path.clone(),
            config.cpu_sample_window(),
        )),
        config.monitor.history_capacity,
    );
    assert!(host.static_info().cpu_count > 0);

    let probe = HealthProbe::new(
        &config.probe.url,
        config.probe_timeout(),
        config.monitor.history_capacity,
        config.monitor.error_capacity,
    )
    .unwrap();
    let locator = ProcessLocator::new(
        Arc::new(ProcessTracker::new()),
        config.process.name_filter.clone(),
        config.process.entry_point.clone(),
    );
    let store = Arc::new(SnapshotFileStorage::new(config.storage.stats_file.clone()));

    let aggregator =
        TelemetryAggregator::new(host, probe, locator, store, config.alerts.clone());
    let scheduler = Scheduler::new(
        SchedulerConfig {
            interval: config.interval(),
            quiet: true,
        },
        aggregator,
    );
    assert_eq!(scheduler.state(), SchedulerState::Stopped);
}
