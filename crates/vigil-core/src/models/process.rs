//! 프로세스 모델.
//!
//! 감시 대상 서비스 프로세스의 식별 정보와 리소스 사용량.

use serde::{Deserialize, Serialize};

/// 열거 시점의 프로세스 후보 (필터링 전/후 공통)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    /// 프로세스 ID
    pub pid: u32,
    /// 실행 파일 이름
    pub name: String,
    /// 명령줄 인자 (argv[0] 포함)
    pub cmdline: Vec<String>,
}

/// 매칭된 프로세스의 리소스 사용량
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// 프로세스 ID
    pub pid: u32,
    /// CPU 사용률 (%)
    pub cpu_percent: f64,
    /// 상주 메모리 (MB)
    pub memory_rss: f64,
    /// 가상 메모리 (MB)
    pub memory_vms: f64,
    /// 스레드 수
    pub threads: usize,
    /// 열린 네트워크 연결 수
    pub connections: usize,
    /// 열린 일반 파일 수
    pub open_files: usize,
}
