//! # Domain Entities Module
//!
//! 저장소에 영속화되는 도메인 엔티티들을 정의하는 모듈입니다.
//!
//! ## 엔티티 관계
//!
//! ```text
//! ┌──────────────┐ 1      0..N ┌──────────────────┐
//! │    Player    │────────────▶│  PlayerModality  │
//! │              │             │                  │
//! │ • email (U)  │             │ • (player_id,    │
//! │ • google_id  │             │    modality_id)U │
//! │   (U, opt)   │             │ • is_main        │
//! │ • plan       │             │   (1 per player) │
//! └──────────────┘             └──────────────────┘
//! ```
//!
//! ## 불변식
//!
//! - 같은 (player_id, modality_id) 쌍은 한 번만 연결됩니다.
//! - 연결이 하나 이상 있으면 정확히 하나가 메인이며, 그것은 첫 번째 연결입니다.
//! - 무료 플랜 플레이어의 연결 수는 2개를 넘지 않습니다.
//! - `google_id`와 `email`은 전체 플레이어에서 유일합니다.

pub mod players;
pub mod modalities;

pub use players::*;
pub use modalities::*;
