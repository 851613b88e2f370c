//! Vigil 도메인 모델.
//!
//! 샘플러, 애그리게이터, 영속화, 렌더링이 공유하는 데이터 구조체를 정의한다.
//! 영속화되는 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod alert;
pub mod health;
pub mod history;
pub mod process;
pub mod snapshot;
pub mod system;
