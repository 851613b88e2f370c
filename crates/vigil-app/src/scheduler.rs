//! 라운드 스케줄러.
//!
//! 고정 간격으로 집계 라운드를 반복한다. 종료 신호는 라운드 사이에서만
//! 반영되므로 진행 중인 라운드는 항상 끝까지 실행되고, 마지막 스냅샷은
//! 디스크에 남는다.

use console::Term;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::aggregator::TelemetryAggregator;

/// 스케줄러 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// 스케줄러 설정
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// 라운드 간격
    pub interval: Duration,
    /// 터미널 출력 억제
    pub quiet: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            quiet: false,
        }
    }
}

/// 라운드 스케줄러
pub struct Scheduler {
    config: SchedulerConfig,
    aggregator: TelemetryAggregator,
    state: SchedulerState,
    term: Term,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig, aggregator: TelemetryAggregator) -> Self {
        Self {
            config,
            aggregator,
            state: SchedulerState::Stopped,
            term: Term::stdout(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn aggregator(&self) -> &TelemetryAggregator {
        &self.aggregator
    }

    /// 종료 신호까지 라운드 반복, 실행한 라운드 수 반환
    pub async fn run(&mut self, mut shutdown_rx: watch::Receiver<bool>) -> u64 {
        self.state = SchedulerState::Running;
        info!(
            "모니터링 시작 (간격 {}초)",
            self.config.interval.as_secs_f64()
        );

        let mut rounds = 0u64;
        loop {
            let report = self.aggregator.collect_and_report().await;
            rounds += 1;

            if !self.config.quiet {
                self.display(&report.summary);
            }

            // 라운드 도중 도착한 종료 신호
            if *shutdown_rx.borrow_and_update() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = shutdown_rx.changed() => {
                    break;
                }
            }
        }

        self.state = SchedulerState::Stopped;
        info!("모니터링 중지 ({rounds}라운드)");
        rounds
    }

    fn display(&self, summary: &str) {
        if let Err(e) = self.term.clear_screen() {
            debug!("터미널 지우기 실패: {e}");
        }
        if let Err(e) = self.term.write_line(summary) {
            debug!("터미널 출력 실패: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::LifecycleManager;
    use crate::test_support::{aggregator_with, refused_url, FakeProcessTable, FakeSystemMonitor};
    use std::sync::Arc;
    use tempfile::TempDir;
    use vigil_core::ports::storage::SnapshotStore;
    use vigil_storage::snapshot_file::SnapshotFileStorage;

    fn quiet(interval: Duration) -> SchedulerConfig {
        SchedulerConfig {
            interval,
            quiet: true,
        }
    }

    #[test]
    fn scheduler_config_default() {
        let config = SchedulerConfig::default();
        assert_eq!(config.interval, Duration::from_secs(5));
        assert!(!config.quiet);
    }

    #[tokio::test]
    async fn pending_shutdown_finishes_current_round() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(SnapshotFileStorage::new(temp.path().join("stats.json")));
        let aggregator = aggregator_with(
            FakeSystemMonitor::new(20.0),
            FakeProcessTable::new(vec![]),
            &refused_url(),
            store.clone(),
        );
        let mut scheduler = Scheduler::new(quiet(Duration::from_secs(60)), aggregator);
        assert_eq!(scheduler.state(), SchedulerState::Stopped);

        let lifecycle = LifecycleManager::new();
        lifecycle.shutdown();

        let rounds = scheduler.run(lifecycle.subscribe()).await;
        assert_eq!(rounds, 1);
        assert_eq!(scheduler.state(), SchedulerState::Stopped);

        let saved = store.load().await.unwrap().unwrap();
        assert_eq!(Some(&saved), scheduler.aggregator().last_snapshot());
    }

    #[tokio::test]
    async fn shutdown_during_sleep_stops_loop() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(SnapshotFileStorage::new(temp.path().join("stats.json")));
        let aggregator = aggregator_with(
            FakeSystemMonitor::new(20.0),
            FakeProcessTable::new(vec![]),
            &refused_url(),
            store,
        );
        let mut scheduler = Scheduler::new(quiet(Duration::from_millis(20)), aggregator);

        let lifecycle = Arc::new(LifecycleManager::new());
        let shutdown_rx = lifecycle.subscribe();
        let trigger = lifecycle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            trigger.shutdown();
        });

        let rounds = tokio::time::timeout(Duration::from_secs(10), scheduler.run(shutdown_rx))
            .await
            .expect("종료 신호 후 루프가 끝나야 함");
        assert!(rounds >= 2);
        assert_eq!(scheduler.state(), SchedulerState::Stopped);

        let last = scheduler.aggregator().last_snapshot().unwrap();
        assert_eq!(last.application.recent_errors.len() as u64, rounds);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn sigterm_stops_scheduler() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(SnapshotFileStorage::new(temp.path().join("stats.json")));
        let aggregator = aggregator_with(
            FakeSystemMonitor::new(20.0),
            FakeProcessTable::new(vec![]),
            &refused_url(),
            store.clone(),
        );
        let mut scheduler = Scheduler::new(quiet(Duration::from_secs(60)), aggregator);

        let lifecycle = Arc::new(LifecycleManager::new());
        lifecycle.spawn_signal_handler().unwrap();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            let status = tokio::process::Command::new("sh")
                .arg("-c")
                .arg(format!("kill -TERM {}", std::process::id()))
                .status()
                .await
                .unwrap();
            assert!(status.success());
        });

        let rounds = tokio::time::timeout(
            Duration::from_secs(10),
            scheduler.run(lifecycle.subscribe()),
        )
        .await
        .expect("SIGTERM 후 루프가 끝나야 함");
        assert_eq!(rounds, 1);
        assert_eq!(scheduler.state(), SchedulerState::Stopped);
        assert!(store.load().await.unwrap().is_some());
    }
}
