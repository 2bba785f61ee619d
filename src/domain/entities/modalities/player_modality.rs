use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 플레이어와 모달리티의 연결
///
/// 생성 이후 이 서비스에서 수정하거나 삭제하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerModality {
    #[serde(rename = "_id")]
    pub id: String,
    pub player_id: String,
    pub modality_id: String,
    /// 플레이어의 첫 번째 연결만 true
    pub is_main: bool,
    pub created_at: DateTime<Utc>,
}

impl PlayerModality {
    pub fn new(id: String, player_id: &str, modality_id: &str, is_main: bool) -> Self {
        Self {
            id,
            player_id: player_id.to_string(),
            modality_id: modality_id.to_string(),
            is_main,
            created_at: Utc::now(),
        }
    }
}
