use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::players::{Player, SubscriptionPlan};

/// 플레이어 응답 DTO
///
/// 비밀번호 해시 필드가 타입 수준에서 존재하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subscription_plan: SubscriptionPlan,
    pub google_id: Option<String>,
    pub avatar_url: Option<String>,
    pub is_email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        let Player {
            id,
            name,
            email,
            subscription_plan,
            google_id,
            avatar_url,
            is_email_verified,
            created_at,
            updated_at,
            ..
        } = player;

        Self {
            id,
            name,
            email,
            subscription_plan,
            google_id,
            avatar_url,
            is_email_verified,
            created_at,
            updated_at,
        }
    }
}

/// 프로바이더 로그인 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderAuthResponse {
    pub player: PlayerResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::players::NewPlayer;

    #[test]
    fn test_password_hash_never_serialized() {
        let mut player = NewPlayer::from_provider(
            "A".to_string(),
            "a@x.com".to_string(),
            "g1".to_string(),
            None,
            true,
        )
        .into_player("p1".to_string());
        player.password_hash = Some("$2b$12$secret".to_string());

        let json = serde_json::to_value(PlayerResponse::from(player)).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["google_id"], "g1");
        assert_eq!(json["subscription_plan"], "free");
    }
}
