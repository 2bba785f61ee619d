//! 플레이어 조회 서비스

use std::sync::Arc;
use crate::{
    core::errors::{AppError, AppResult},
    domain::dto::players::PlayerResponse,
    repositories::players::PlayerStore,
};

pub struct PlayerService {
    player_store: Arc<dyn PlayerStore>,
}

impl PlayerService {
    pub fn new(player_store: Arc<dyn PlayerStore>) -> Self {
        Self { player_store }
    }

    /// ID로 플레이어를 조회합니다. 응답에는 비밀번호 해시가 포함되지 않습니다.
    pub async fn get_player(&self, player_id: &str) -> AppResult<PlayerResponse> {
        let player = self.player_store
            .find_by_id(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Player".to_string()))?;

        Ok(PlayerResponse::from(player))
    }
}
