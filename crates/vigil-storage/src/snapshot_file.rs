//! 스냅샷 JSON 파일 저장소.
//!
//! 매 라운드 하나의 파일을 통째로 덮어쓴다. 쓰기는
//! `<파일명>.tmp`에 먼저 기록한 뒤 rename으로 교체한다.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use vigil_core::error::CoreError;
use vigil_core::models::snapshot::Snapshot;
use vigil_core::ports::storage::SnapshotStore;

/// 스냅샷 파일 저장소 (`SnapshotStore` 포트 구현)
pub struct SnapshotFileStorage {
    path: PathBuf,
}

impl SnapshotFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 저장 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStore for SnapshotFileStorage {
    async fn save(&self, snapshot: &Snapshot) -> Result<(), CoreError> {
        let content = serde_json::to_vec_pretty(snapshot)?;
        let temp = self.temp_path();

        fs::write(&temp, &content).await.map_err(|e| {
            CoreError::Internal(format!("스냅샷 임시 파일 쓰기 실패: {}: {e}", temp.display()))
        })?;

        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(CoreError::Internal(format!(
                "스냅샷 파일 교체 실패: {}: {e}",
                self.path.display()
            )));
        }

        debug!(
            "스냅샷 저장: {} ({} bytes)",
            self.path.display(),
            content.len()
        );
        Ok(())
    }

    async fn load(&self) -> Result<Option<Snapshot>, CoreError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot = serde_json::from_slice(&content)?;
        Ok(Some(snapshot))
    }
}
