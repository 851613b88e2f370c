//! 애플리케이션 설정 구조체.
//!
//! 프로브 대상 URL, 샘플링 주기, 프로세스 시그니처, 저장 경로, 경고 임계값,
//! 로깅 설정을 정의한다. `ConfigManager`를 통해 JSON 파일에서 로드하며
//! CLI 인자로 오버라이드할 수 있다.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;
use crate::models::health::DEFAULT_ERROR_CAPACITY;
use crate::models::history::DEFAULT_HISTORY_CAPACITY;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 헬스 프로브 설정
    #[serde(default)]
    pub probe: ProbeConfig,
    /// 샘플링 루프 설정
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// 감시 대상 프로세스 시그니처
    #[serde(default)]
    pub process: ProcessConfig,
    /// 스냅샷 저장 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 경고 임계값
    #[serde(default)]
    pub alerts: AlertConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============================================================
// 섹션별 설정
// ============================================================

/// 헬스 프로브 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// 프로브 대상 URL
    #[serde(default = "default_probe_url")]
    pub url: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: default_probe_url(),
            timeout_ms: default_probe_timeout_ms(),
        }
    }
}

/// 샘플링 루프 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// 라운드 간격 (초)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// 히스토리 버퍼 용량
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// 프로브 에러 FIFO 용량
    #[serde(default = "default_error_capacity")]
    pub error_capacity: usize,
    /// CPU 샘플링 구간 (밀리초)
    #[serde(default = "default_cpu_sample_ms")]
    pub cpu_sample_ms: u64,
    /// 디스크 사용량 측정 경로
    #[serde(default = "default_disk_path")]
    pub disk_path: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            history_capacity: default_history_capacity(),
            error_capacity: default_error_capacity(),
            cpu_sample_ms: default_cpu_sample_ms(),
            disk_path: default_disk_path(),
        }
    }
}

/// 감시 대상 프로세스 시그니처
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// 실행 파일 이름 부분 문자열 (대소문자 무시)
    #[serde(default = "default_name_filter")]
    pub name_filter: String,
    /// 명령줄에 포함되어야 하는 엔트리포인트 파일명
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            name_filter: default_name_filter(),
            entry_point: default_entry_point(),
        }
    }
}

/// 스냅샷 저장 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 최신 스냅샷 JSON 파일 경로
    #[serde(default = "default_stats_file")]
    pub stats_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            stats_file: default_stats_file(),
        }
    }
}

/// 경고 임계값 (%)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// CPU 사용률 경고 임계값
    #[serde(default = "default_usage_threshold")]
    pub cpu_threshold: f64,
    /// 메모리 사용률 경고 임계값
    #[serde(default = "default_usage_threshold")]
    pub memory_threshold: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cpu_threshold: default_usage_threshold(),
            memory_threshold: default_usage_threshold(),
        }
    }
}

/// 로깅 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 파일 경로 (None이면 콘솔만)
    #[serde(default = "default_log_file")]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: default_log_file(),
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            probe: ProbeConfig::default(),
            monitor: MonitorConfig::default(),
            process: ProcessConfig::default(),
            storage: StorageConfig::default(),
            alerts: AlertConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// 라운드 간격을 Duration으로 반환
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.monitor.interval_secs)
    }

    /// 프로브 타임아웃을 Duration으로 반환
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe.timeout_ms)
    }

    /// CPU 샘플링 구간을 Duration으로 반환
    pub fn cpu_sample_window(&self) -> Duration {
        Duration::from_millis(self.monitor.cpu_sample_ms)
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.probe.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid("probe.url", format!("http(s) URL이 아님: {url:?}")));
        }
        if self.probe.timeout_ms == 0 {
            return Err(invalid("probe.timeout_ms", "0보다 커야 함"));
        }
        if self.monitor.interval_secs == 0 {
            return Err(invalid("monitor.interval_secs", "0보다 커야 함"));
        }
        if self.monitor.history_capacity == 0 {
            return Err(invalid("monitor.history_capacity", "0보다 커야 함"));
        }
        if self.monitor.error_capacity == 0 {
            return Err(invalid("monitor.error_capacity", "0보다 커야 함"));
        }
        for (field, value) in [
            ("alerts.cpu_threshold", self.alerts.cpu_threshold),
            ("alerts.memory_threshold", self.alerts.memory_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(field, format!("0~100 범위를 벗어남: {value}")));
            }
        }
        if self.process.entry_point.trim().is_empty() {
            return Err(invalid("process.entry_point", "비어 있음"));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

fn invalid(field: &str, message: impl Into<String>) -> CoreError {
    CoreError::Validation {
        field: field.to_string(),
        message: message.into(),
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_probe_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_probe_timeout_ms() -> u64 {
    10_000
}
fn default_interval_secs() -> u64 {
    5
}
fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}
fn default_error_capacity() -> usize {
    DEFAULT_ERROR_CAPACITY
}
fn default_cpu_sample_ms() -> u64 {
    1_000
}
fn default_disk_path() -> PathBuf {
    PathBuf::from("/")
}
fn default_name_filter() -> String {
    "python".to_string()
}
fn default_entry_point() -> String {
    "server.py".to_string()
}
fn default_stats_file() -> PathBuf {
    PathBuf::from("monitor_stats.json")
}
fn default_usage_threshold() -> f64 {
    90.0
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("monitor.log"))
}
