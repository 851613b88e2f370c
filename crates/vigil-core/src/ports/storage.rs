//! 스냅샷 저장소 포트.
//!
//! 구현: `vigil-storage` crate (JSON 파일, 원자적 교체)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::snapshot::Snapshot;

/// 최신 스냅샷 저장소
///
/// 이력은 보관하지 않는다. 매 라운드 이전 스냅샷을 덮어쓴다.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// 스냅샷 저장 (기존 내용 덮어쓰기)
    async fn save(&self, snapshot: &Snapshot) -> Result<(), CoreError>;

    /// 마지막으로 저장된 스냅샷 조회 (없으면 `None`)
    async fn load(&self) -> Result<Option<Snapshot>, CoreError>;
}
