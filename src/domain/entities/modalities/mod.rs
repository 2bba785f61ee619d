//! Modalities Entity Module
//!
//! 플레이어-모달리티 연결 엔티티를 정의합니다.

pub mod player_modality;

pub use player_modality::*;
