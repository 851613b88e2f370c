//! # vigil-storage
//!
//! 로컬 저장소 어댑터.
//! 최신 스냅샷 하나를 JSON 파일로 보관하며, 외부 리더가 쓰다 만 파일을
//! 보지 않도록 임시 파일에 쓴 뒤 rename으로 교체한다.
//!
//! ## 모듈
//! - `snapshot_file`: 스냅샷 파일 저장소 (SnapshotStore 구현)

pub mod snapshot_file;
