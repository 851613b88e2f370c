//! 시스템 리소스 모니터링.
//!
//! `SystemMonitor` 포트 구현. sysinfo 기반 CPU/메모리/디스크 수집.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use sysinfo::{Disks, System};
use tracing::debug;
use vigil_core::error::CoreError;
use vigil_core::models::system::{StaticInfo, UsageInfo, BYTES_PER_GB};
use vigil_core::ports::monitor::SystemMonitor;

/// sysinfo 기반 시스템 모니터 (`SystemMonitor` 포트 구현)
pub struct SysInfoMonitor {
    sys: Mutex<System>,
    /// 디스크 사용량 측정 경로
    disk_path: PathBuf,
    /// CPU 샘플링 구간
    cpu_window: Duration,
}

impl SysInfoMonitor {
    /// 새 시스템 모니터 생성
    pub fn new(disk_path: impl Into<PathBuf>, cpu_window: Duration) -> Self {
        Self {
            sys: Mutex::new(System::new_all()),
            disk_path: disk_path.into(),
            cpu_window: cpu_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    fn lock_sys(&self) -> Result<std::sync::MutexGuard<'_, System>, CoreError> {
        self.sys
            .lock()
            .map_err(|e| CoreError::Internal(format!("시스템 잠금 실패: {e}")))
    }
}

impl Default for SysInfoMonitor {
    fn default() -> Self {
        Self::new("/", Duration::from_secs(1))
    }
}

/// 경로를 포함하는 마운트 지점 중 가장 긴 것을 선택
fn best_mount<'a, I>(path: &Path, mounts: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Path>,
{
    mounts
        .into_iter()
        .enumerate()
        .filter(|(_, mount)| path.starts_with(mount))
        .max_by_key(|(_, mount)| mount.components().count())
        .map(|(idx, _)| idx)
}

#[async_trait]
impl SystemMonitor for SysInfoMonitor {
    async fn cpu_percent(&self) -> Result<f64, CoreError> {
        // 기준점 갱신 → 샘플링 구간 대기 → 재갱신
        {
            let mut sys = self.lock_sys()?;
            sys.refresh_cpu_usage();
        }
        tokio::time::sleep(self.cpu_window).await;

        let mut sys = self.lock_sys()?;
        sys.refresh_cpu_usage();
        if sys.cpus().is_empty() {
            return Err(CoreError::unavailable("cpu", "CPU 정보를 읽을 수 없음"));
        }

        let usage = f64::from(sys.global_cpu_usage());
        debug!("CPU 사용률: {:.1}%", usage);
        Ok(usage)
    }

    async fn memory_usage(&self) -> Result<UsageInfo, CoreError> {
        let mut sys = self.lock_sys()?;
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(CoreError::unavailable("memory", "전체 메모리 0"));
        }
        let used = total.saturating_sub(sys.available_memory());
        let usage = UsageInfo::from_bytes(used, total);

        debug!(
            "메모리: {:.2}/{:.2}GB ({:.1}%)",
            usage.used_gb, usage.total_gb, usage.percent
        );
        Ok(usage)
    }

    async fn disk_usage(&self) -> Result<UsageInfo, CoreError> {
        let disks = Disks::new_with_refreshed_list();
        let list = disks.list();

        let idx = best_mount(&self.disk_path, list.iter().map(|d| d.mount_point()))
            .ok_or_else(|| {
                CoreError::unavailable(
                    "disk",
                    format!("마운트 지점 없음: {}", self.disk_path.display()),
                )
            })?;

        let disk = &list[idx];
        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());
        let usage = UsageInfo::from_bytes(used, total);

        debug!(
            "디스크 {}: {:.2}/{:.2}GB ({:.1}%)",
            disk.mount_point().display(),
            usage.used_gb,
            usage.total_gb,
            usage.percent
        );
        Ok(usage)
    }

    fn static_info(&self) -> StaticInfo {
        let os = System::long_os_version().unwrap_or_else(|| "unknown".to_string());
        let platform = match System::kernel_version() {
            Some(kernel) => format!("{os} (kernel {kernel}, {})", std::env::consts::ARCH),
            None => format!("{os} ({})", std::env::consts::ARCH),
        };

        let (cpu_count, memory_total) = match self.sys.lock() {
            Ok(sys) => (sys.cpus().len(), sys.total_memory()),
            Err(_) => (0, 0),
        };

        StaticInfo {
            platform,
            cpu_count,
            memory_total_gb: memory_total as f64 / BYTES_PER_GB,
        }
    }
}
