//! 서비스 프로세스 탐색.
//!
//! 실행 파일 이름(대소문자 무시)과 명령줄의 엔트리포인트 파일명으로
//! 감시 대상 프로세스를 찾는다. 매 호출마다 새로 열거하며 캐시하지 않는다.

use std::sync::Arc;
use tracing::{debug, warn};
use vigil_core::models::process::{ProcessEntry, ProcessInfo};
use vigil_core::ports::monitor::ProcessMonitor;

/// 프로세스 시그니처 매칭기
pub struct ProcessLocator {
    monitor: Arc<dyn ProcessMonitor>,
    name_filter: String,
    entry_point: String,
}

impl ProcessLocator {
    pub fn new(
        monitor: Arc<dyn ProcessMonitor>,
        name_filter: impl Into<String>,
        entry_point: impl Into<String>,
    ) -> Self {
        Self {
            monitor,
            name_filter: name_filter.into(),
            entry_point: entry_point.into(),
        }
    }

    /// 설정된 이름 필터
    pub fn name_filter(&self) -> &str {
        &self.name_filter
    }

    /// 시그니처와 일치하는 프로세스 목록 (PID 오름차순)
    ///
    /// 열거 자체가 실패하면 경고를 남기고 빈 목록을 반환한다.
    pub async fn find_processes(&self, name_filter: &str) -> Vec<ProcessEntry> {
        let processes = match self.monitor.list_processes().await {
            Ok(processes) => processes,
            Err(e) => {
                warn!("프로세스 열거 실패: {e}");
                return Vec::new();
            }
        };

        let matched: Vec<ProcessEntry> = processes
            .into_iter()
            .filter(|p| matches(p, name_filter, &self.entry_point))
            .collect();

        debug!(
            "프로세스 매칭: filter={name_filter:?} entry={:?} → {}개",
            self.entry_point,
            matched.len()
        );
        matched
    }

    /// 매칭된 프로세스의 리소스 사용량
    ///
    /// 조회 사이에 종료되었거나 접근이 거부된 경우 `None`.
    pub async fn process_info(&self, process: &ProcessEntry) -> Option<ProcessInfo> {
        match self.monitor.process_info(process.pid).await {
            Ok(info) => info,
            Err(e) => {
                debug!("프로세스 정보 조회 실패 (pid={}): {e}", process.pid);
                None
            }
        }
    }

    /// 첫 번째로 조회 가능한 매칭 프로세스의 정보
    ///
    /// 앞선 매칭이 조회 중 사라지면 다음 매칭으로 넘어간다.
    pub async fn locate(&self) -> Option<ProcessInfo> {
        for process in self.find_processes(&self.name_filter).await {
            if let Some(info) = self.process_info(&process).await {
                return Some(info);
            }
        }
        None
    }
}

/// 이름 필터와 엔트리포인트가 모두 일치하는지
pub fn matches(process: &ProcessEntry, name_filter: &str, entry_point: &str) -> bool {
    let name = process.name.to_lowercase();
    if !name.contains(&name_filter.to_lowercase()) {
        return false;
    }
    let entry_point = entry_point.to_lowercase();
    process
        .cmdline
        .iter()
        .any(|arg| arg.to_lowercase().contains(&entry_point))
}
