//! 호스트 샘플러.
//!
//! CPU/메모리/디스크 사용률을 수집하고 메트릭별 롤링 히스토리를 유지한다.
//! 한 메트릭의 수집 실패는 해당 필드만 `None`으로 열화시키며,
//! 열화된 값은 히스토리에 추가하지 않는다.

use std::sync::Arc;
use tracing::{debug, warn};
use vigil_core::error::CoreError;
use vigil_core::models::history::HistoryBuffer;
use vigil_core::models::system::{HostReading, StaticInfo, UsageInfo};
use vigil_core::ports::monitor::SystemMonitor;

/// 호스트 샘플러
pub struct HostSampler {
    monitor: Arc<dyn SystemMonitor>,
    cpu_history: HistoryBuffer<f64>,
    memory_history: HistoryBuffer<f64>,
    disk_history: HistoryBuffer<f64>,
}

impl HostSampler {
    /// 새 샘플러 생성 (히스토리 3개는 같은 용량)
    pub fn new(monitor: Arc<dyn SystemMonitor>, history_capacity: usize) -> Self {
        Self {
            monitor,
            cpu_history: HistoryBuffer::new(history_capacity),
            memory_history: HistoryBuffer::new(history_capacity),
            disk_history: HistoryBuffer::new(history_capacity),
        }
    }

    /// 샘플링 구간 동안의 CPU 사용률 (%)
    pub async fn cpu_percent(&self) -> Result<f64, CoreError> {
        self.monitor.cpu_percent().await
    }

    /// 메모리 사용량
    pub async fn memory_usage(&self) -> Result<UsageInfo, CoreError> {
        self.monitor.memory_usage().await
    }

    /// 디스크 사용량
    pub async fn disk_usage(&self) -> Result<UsageInfo, CoreError> {
        self.monitor.disk_usage().await
    }

    /// 정적 호스트 정보
    pub fn static_info(&self) -> StaticInfo {
        self.monitor.static_info()
    }

    /// 세 메트릭을 한 번씩 수집하고 히스토리에 추가
    pub async fn update_history(&mut self) -> HostReading {
        let cpu_percent = match self.monitor.cpu_percent().await {
            Ok(value) => {
                self.cpu_history.append(value);
                Some(value)
            }
            Err(e) => {
                warn!("CPU 수집 실패: {e}");
                None
            }
        };

        let memory = match self.monitor.memory_usage().await {
            Ok(usage) => {
                self.memory_history.append(usage.percent);
                Some(usage)
            }
            Err(e) => {
                warn!("메모리 수집 실패: {e}");
                None
            }
        };

        let disk = match self.monitor.disk_usage().await {
            Ok(usage) => {
                self.disk_history.append(usage.percent);
                Some(usage)
            }
            Err(e) => {
                warn!("디스크 수집 실패: {e}");
                None
            }
        };

        debug!(
            "호스트 샘플: cpu={:?} mem={:?} disk={:?}",
            cpu_percent,
            memory.map(|m| m.percent),
            disk.map(|d| d.percent)
        );

        HostReading {
            cpu_percent,
            memory,
            disk,
        }
    }

    pub fn cpu_history(&self) -> &HistoryBuffer<f64> {
        &self.cpu_history
    }

    pub fn memory_history(&self) -> &HistoryBuffer<f64> {
        &self.memory_history
    }

    pub fn disk_history(&self) -> &HistoryBuffer<f64> {
        &self.disk_history
    }
}
