//! 시스템 모니터링 포트.
//!
//! 구현: `vigil-monitor` crate (sysinfo + /proc)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::process::{ProcessEntry, ProcessInfo};
use crate::models::system::{StaticInfo, UsageInfo};

/// 호스트 리소스 조회 (CPU, 메모리, 디스크)
///
/// 각 메서드는 독립적으로 실패할 수 있다.
#[async_trait]
pub trait SystemMonitor: Send + Sync {
    /// 전체 CPU 사용률 (%). 짧은 샘플링 구간 동안 대기한다.
    async fn cpu_percent(&self) -> Result<f64, CoreError>;

    /// 메모리 사용량
    async fn memory_usage(&self) -> Result<UsageInfo, CoreError>;

    /// 감시 경로가 속한 디스크 사용량
    async fn disk_usage(&self) -> Result<UsageInfo, CoreError>;

    /// 정적 호스트 정보
    fn static_info(&self) -> StaticInfo;
}

/// OS 프로세스 조회
#[async_trait]
pub trait ProcessMonitor: Send + Sync {
    /// 전체 프로세스 열거 (PID 오름차순)
    async fn list_processes(&self) -> Result<Vec<ProcessEntry>, CoreError>;

    /// 프로세스 리소스 사용량 조회
    ///
    /// 조회 사이에 종료되었거나 접근이 거부된 프로세스는 `Ok(None)`.
    async fn process_info(&self, pid: u32) -> Result<Option<ProcessInfo>, CoreError>;
}
