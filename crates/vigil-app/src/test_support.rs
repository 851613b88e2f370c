//! 단위 테스트용 가짜 포트 구현.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vigil_core::config::AlertConfig;
use vigil_core::error::CoreError;
use vigil_core::models::process::{ProcessEntry, ProcessInfo};
use vigil_core::models::system::{StaticInfo, UsageInfo};
use vigil_core::ports::monitor::{ProcessMonitor, SystemMonitor};
use vigil_core::ports::storage::SnapshotStore;
use vigil_monitor::host::HostSampler;
use vigil_monitor::locator::ProcessLocator;
use vigil_network::health::HealthProbe;

use crate::aggregator::TelemetryAggregator;

/// CPU 값을 외부에서 바꿀 수 있는 가짜 시스템 모니터
pub struct FakeSystemMonitor {
    cpu: Arc<Mutex<f64>>,
}

impl FakeSystemMonitor {
    pub fn new(cpu: f64) -> Self {
        Self {
            cpu: Arc::new(Mutex::new(cpu)),
        }
    }

    pub fn cpu_handle(&self) -> Arc<Mutex<f64>> {
        self.cpu.clone()
    }
}

#[async_trait]
impl SystemMonitor for FakeSystemMonitor {
    async fn cpu_percent(&self) -> Result<f64, CoreError> {
        Ok(*self.cpu.lock().unwrap())
    }

    async fn memory_usage(&self) -> Result<UsageInfo, CoreError> {
        Ok(UsageInfo {
            total_gb: 16.0,
            used_gb: 8.0,
            percent: 50.0,
        })
    }

    async fn disk_usage(&self) -> Result<UsageInfo, CoreError> {
        Ok(UsageInfo {
            total_gb: 100.0,
            used_gb: 30.0,
            percent: 30.0,
        })
    }

    fn static_info(&self) -> StaticInfo {
        StaticInfo {
            platform: "TestOS".to_string(),
            cpu_count: 4,
            memory_total_gb: 16.0,
        }
    }
}

/// 가짜 프로세스 테이블 (목록을 비우면 프로세스가 종료된 것으로 본다)
pub struct FakeProcessTable {
    processes: Arc<Mutex<Vec<ProcessEntry>>>,
}

impl FakeProcessTable {
    pub fn new(processes: Vec<ProcessEntry>) -> Self {
        Self {
            processes: Arc::new(Mutex::new(processes)),
        }
    }

    /// `python3 server.py` 프로세스 하나
    pub fn with_server(pid: u32) -> Self {
        Self::new(vec![ProcessEntry {
            pid,
            name: "python3".to_string(),
            cmdline: vec!["python3".to_string(), "server.py".to_string()],
        }])
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<ProcessEntry>>> {
        self.processes.clone()
    }
}

#[async_trait]
impl ProcessMonitor for FakeProcessTable {
    async fn list_processes(&self) -> Result<Vec<ProcessEntry>, CoreError> {
        Ok(self.processes.lock().unwrap().clone())
    }

    async fn process_info(&self, pid: u32) -> Result<Option<ProcessInfo>, CoreError> {
        let alive = self.processes.lock().unwrap().iter().any(|p| p.pid == pid);
        Ok(alive.then(|| ProcessInfo {
            pid,
            cpu_percent: 2.0,
            memory_rss: 64.0,
            memory_vms: 256.0,
            threads: 3,
            connections: 1,
            open_files: 2,
        }))
    }
}

/// 닫힌 포트 URL (바인딩 후 즉시 해제)
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}

/// 가짜 포트로 구성한 집계기
pub fn aggregator_with(
    system: FakeSystemMonitor,
    processes: FakeProcessTable,
    url: &str,
    store: Arc<dyn SnapshotStore>,
) -> TelemetryAggregator {
    let host = HostSampler::new(Arc::new(system), 60);
    let probe = HealthProbe::new(url, Duration::from_secs(2), 60, 100).unwrap();
    let locator = ProcessLocator::new(Arc::new(processes), "python", "server.py");
    TelemetryAggregator::new(host, probe, locator, store, AlertConfig::default())
}
