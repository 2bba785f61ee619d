use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::modalities::PlayerModality;

/// 플레이어 모달리티 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerModalityResponse {
    pub id: String,
    pub player_id: String,
    pub modality_id: String,
    pub is_main: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PlayerModality> for PlayerModalityResponse {
    fn from(link: PlayerModality) -> Self {
        Self {
            id: link.id,
            player_id: link.player_id,
            modality_id: link.modality_id,
            is_main: link.is_main,
            created_at: link.created_at,
        }
    }
}
