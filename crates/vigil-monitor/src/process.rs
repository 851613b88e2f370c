//! OS 프로세스 조회.
//!
//! `ProcessMonitor` 포트 구현. 프로세스 열거와 CPU/메모리/스레드는 sysinfo,
//! 연결/열린 파일 수는 Linux에서 `/proc/<pid>/fd`를 직접 읽는다.

use async_trait::async_trait;
use std::sync::Mutex;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::debug;
use vigil_core::error::CoreError;
use vigil_core::models::process::{ProcessEntry, ProcessInfo};
use vigil_core::ports::monitor::ProcessMonitor;

/// 바이트 → MB 변환 계수
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// 프로세스 추적기 (`ProcessMonitor` 포트 구현)
pub struct ProcessTracker {
    sys: Mutex<System>,
}

impl ProcessTracker {
    /// 새 프로세스 추적기 생성
    pub fn new() -> Self {
        Self {
            sys: Mutex::new(System::new()),
        }
    }
}

impl Default for ProcessTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// 파일 디스크립터 집계 결과
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct FdCounts {
    connections: usize,
    open_files: usize,
}

/// fd 링크 대상 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FdKind {
    Socket,
    File,
    Other,
}

fn classify_fd_target(target: &str) -> FdKind {
    if target.starts_with("socket:") {
        FdKind::Socket
    } else if target.starts_with('/')
        && !target.starts_with("/dev/")
        && !target.starts_with("/proc/")
        && !target.ends_with(" (deleted)")
    {
        FdKind::File
    } else {
        FdKind::Other
    }
}

/// `/proc/<pid>/fd` 기반 소켓/파일 집계
///
/// 프로세스 종료(`NotFound`) 또는 권한 없음(`PermissionDenied`)이면 `None`.
#[cfg(target_os = "linux")]
fn read_fd_counts(pid: u32) -> Option<FdCounts> {
    let entries = std::fs::read_dir(format!("/proc/{pid}/fd")).ok()?;
    let mut counts = FdCounts::default();
    for entry in entries.flatten() {
        let Ok(target) = std::fs::read_link(entry.path()) else {
            continue;
        };
        match classify_fd_target(&target.to_string_lossy()) {
            FdKind::Socket => counts.connections += 1,
            FdKind::File => counts.open_files += 1,
            FdKind::Other => {}
        }
    }
    Some(counts)
}

#[async_trait]
impl ProcessMonitor for ProcessTracker {
    async fn list_processes(&self) -> Result<Vec<ProcessEntry>, CoreError> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|e| CoreError::Internal(format!("시스템 잠금 실패: {e}")))?;
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_memory()
                .with_cmd(UpdateKind::OnlyIfNotSet),
        );

        // 스레드(task)는 프로세스 후보에서 제외
        let mut entries: Vec<ProcessEntry> = sys
            .processes()
            .values()
            .filter(|p| p.thread_kind().is_none())
            .map(|p| ProcessEntry {
                pid: p.pid().as_u32(),
                name: p.name().to_string_lossy().to_string(),
                cmdline: p
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy().to_string())
                    .collect(),
            })
            .collect();

        // HashMap 순회 순서에 의존하지 않도록 PID 순 정렬
        entries.sort_by_key(|e| e.pid);

        debug!("프로세스 {}개 열거", entries.len());
        Ok(entries)
    }

    async fn process_info(&self, pid: u32) -> Result<Option<ProcessInfo>, CoreError> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|e| CoreError::Internal(format!("시스템 잠금 실패: {e}")))?;
        let sys_pid = Pid::from_u32(pid);
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[sys_pid]),
            true,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_memory()
                .with_tasks(),
        );

        let Some(process) = sys.process(sys_pid) else {
            debug!("프로세스 종료됨: pid={pid}");
            return Ok(None);
        };

        // 메인 스레드만 있는 경우 task 목록이 비어있을 수 있음
        let threads = process.tasks().map(|t| t.len()).unwrap_or(0).max(1);

        #[cfg(target_os = "linux")]
        let fds = match read_fd_counts(pid) {
            Some(counts) => counts,
            None => {
                debug!("프로세스 조회 불가 (종료 또는 권한 없음): pid={pid}");
                return Ok(None);
            }
        };

        #[cfg(not(target_os = "linux"))]
        let fds = FdCounts::default();

        let info = ProcessInfo {
            pid,
            cpu_percent: f64::from(process.cpu_usage()),
            memory_rss: process.memory() as f64 / BYTES_PER_MB,
            memory_vms: process.virtual_memory() as f64 / BYTES_PER_MB,
            threads,
            connections: fds.connections,
            open_files: fds.open_files,
        };

        debug!(
            "프로세스 pid={} CPU {:.1}%, RSS {:.1}MB, 스레드 {}",
            info.pid, info.cpu_percent, info.memory_rss, info.threads
        );
        Ok(Some(info))
    }
}
