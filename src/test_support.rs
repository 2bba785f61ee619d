//! 테스트 공용 헬퍼

use crate::domain::entities::players::{NewPlayer, Player, SubscriptionPlan};
use crate::repositories::memory::InMemoryPlayerStore;

pub fn player(id: &str, email: &str, plan: SubscriptionPlan, google_id: Option<&str>) -> Player {
    NewPlayer {
        name: format!("player {}", id),
        email: email.to_string(),
        google_id: google_id.map(str::to_string),
        avatar_url: None,
        is_email_verified: true,
        subscription_plan: plan,
    }
    .into_player(id.to_string())
}

pub fn seed_player(
    store: &InMemoryPlayerStore,
    id: &str,
    email: &str,
    plan: SubscriptionPlan,
    google_id: Option<&str>,
) -> Player {
    let player = player(id, email, plan, google_id);
    store.seed(player.clone()).expect("seed player");
    player
}
