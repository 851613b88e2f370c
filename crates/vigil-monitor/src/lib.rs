//! # vigil-monitor
//!
//! 호스트 및 프로세스 모니터링 어댑터.
//! sysinfo 기반으로 CPU/메모리/디스크 사용량을 수집하고,
//! 실행 파일 이름과 명령줄 시그니처로 감시 대상 서비스 프로세스를 찾는다.
//!
//! ## 모듈
//! - `system`: `SystemMonitor` 포트 구현 (sysinfo)
//! - `process`: `ProcessMonitor` 포트 구현 (sysinfo + /proc)
//! - `host`: 호스트 샘플러 (메트릭별 롤링 히스토리 소유)
//! - `locator`: 프로세스 시그니처 매칭

pub mod host;
pub mod locator;
pub mod process;
pub mod system;
