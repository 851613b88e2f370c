//! 라운드 스냅샷 모델.
//!
//! 한 라운드에서 수집한 호스트/애플리케이션/프로세스 뷰를 병합한 결과.
//! 영속화 파일(JSON)의 스키마이기도 하다.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::health::ErrorRecord;
use crate::models::process::ProcessInfo;

/// 한 라운드의 병합 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 수집 시각
    pub timestamp: DateTime<Utc>,
    /// 호스트 리소스
    pub system: SystemSection,
    /// 애플리케이션 헬스
    pub application: ApplicationSection,
    /// 감시 대상 프로세스 (미발견 시 빈 객체)
    pub process: ProcessBlock,
}

/// 호스트 리소스 섹션
///
/// 현재값은 수집 실패 시 `null`로 직렬화된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSection {
    pub cpu_percent: Option<f64>,
    pub memory_percent: Option<f64>,
    pub disk_percent: Option<f64>,
    pub cpu_history: Vec<f64>,
    pub memory_history: Vec<f64>,
    pub disk_history: Vec<f64>,
}

/// 애플리케이션 헬스 섹션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSection {
    pub is_alive: bool,
    pub status_code: u16,
    /// 이번 프로브 응답 시간 (초)
    pub response_time: f64,
    /// 성공한 프로브의 평균 응답 시간 (초)
    pub avg_response_time: f64,
    pub error_rate: f64,
    pub recent_errors: Vec<ErrorRecord>,
}

/// 프로세스 섹션
///
/// 프로세스 미발견은 정상 상태이며 `{}`로 직렬화된다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessBlock(pub Option<ProcessInfo>);

impl ProcessBlock {
    /// 빈 프로세스 섹션
    pub fn empty() -> Self {
        Self(None)
    }

    /// 발견된 프로세스 정보
    pub fn info(&self) -> Option<&ProcessInfo> {
        self.0.as_ref()
    }

    /// 비어있는지
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<ProcessInfo>> for ProcessBlock {
    fn from(info: Option<ProcessInfo>) -> Self {
        Self(info)
    }
}

impl Serialize for ProcessBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(info) => info.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

impl<'de> Deserialize<'de> for ProcessBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Found(ProcessInfo),
            Empty {},
        }

        match Repr::deserialize(deserializer)? {
            Repr::Found(info) => Ok(Self(Some(info))),
            Repr::Empty {} => Ok(Self(None)),
        }
    }
}
