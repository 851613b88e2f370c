//! 호스트 시스템 메트릭 모델.
//!
//! CPU, 메모리, 디스크 사용률과 정적 호스트 정보를 표현.

use serde::{Deserialize, Serialize};

/// 바이트 → GB 변환 계수
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// 용량형 리소스 사용량 (메모리, 디스크)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageInfo {
    /// 전체 용량 (GB)
    pub total_gb: f64,
    /// 사용량 (GB)
    pub used_gb: f64,
    /// 사용률 (0.0 ~ 100.0)
    pub percent: f64,
}

impl UsageInfo {
    /// 바이트 단위 값으로부터 생성
    pub fn from_bytes(used: u64, total: u64) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            used as f64 / total as f64 * 100.0
        };
        Self {
            total_gb: total as f64 / BYTES_PER_GB,
            used_gb: used as f64 / BYTES_PER_GB,
            percent,
        }
    }
}

/// 한 라운드의 호스트 샘플
///
/// 각 필드는 독립적으로 수집되며, 수집 실패 시 `None`으로 열화된다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostReading {
    /// CPU 사용률 (%)
    pub cpu_percent: Option<f64>,
    /// 메모리 사용량
    pub memory: Option<UsageInfo>,
    /// 디스크 사용량
    pub disk: Option<UsageInfo>,
}

impl HostReading {
    /// 메모리 사용률 (%)
    pub fn memory_percent(&self) -> Option<f64> {
        self.memory.map(|m| m.percent)
    }

    /// 디스크 사용률 (%)
    pub fn disk_percent(&self) -> Option<f64> {
        self.disk.map(|d| d.percent)
    }
}

/// 정적 호스트 정보 (시작 시 1회 기록)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticInfo {
    /// OS/플랫폼 문자열 (예: "Linux 6.8 (Ubuntu 24.04)")
    pub platform: String,
    /// 논리 CPU 수
    pub cpu_count: usize,
    /// 전체 메모리 (GB)
    pub memory_total_gb: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_from_bytes() {
        let usage = UsageInfo::from_bytes(4 * 1024 * 1024 * 1024, 16 * 1024 * 1024 * 1024);
        assert!((usage.total_gb - 16.0).abs() < 1e-9);
        assert!((usage.used_gb - 4.0).abs() < 1e-9);
        assert!((usage.percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn usage_with_zero_total() {
        let usage = UsageInfo::from_bytes(0, 0);
        assert_eq!(usage.percent, 0.0);
    }

    #[test]
    fn reading_percent_accessors() {
        let reading = HostReading {
            cpu_percent: Some(10.0),
            memory: Some(UsageInfo::from_bytes(1, 2)),
            disk: None,
        };
        assert_eq!(reading.memory_percent(), Some(50.0));
        assert_eq!(reading.disk_percent(), None);
    }
}
