//! # 인메모리 저장소 구현
//!
//! 프로세스 메모리에 플레이어와 모달리티 연결을 보관하는 저장소입니다.
//! 테스트와 `STORE_BACKEND=memory` 로컬 실행에 사용합니다.
//!
//! 각 쓰기는 하나의 쓰기 락 안에서 제약 검사와 삽입을 함께 수행하므로,
//! 동시 요청이 같은 제약을 놓고 경쟁하면 두 번째 쓰기가
//! `StoreError::UniqueViolation`으로 거부됩니다.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use async_trait::async_trait;
use chrono::Utc;
use crate::{
    core::errors::{Constraint, StoreError},
    domain::entities::{
        modalities::PlayerModality,
        players::{ModalityQuota, NewPlayer, Player},
    },
    repositories::{modalities::ModalityLinkStore, players::PlayerStore},
};

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Backend("in-memory store lock poisoned".to_string())
}

#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    players: RwLock<HashMap<String, Player>>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 준비된 플레이어 레코드를 그대로 저장합니다. 제약 검사는 하지 않습니다.
    pub fn seed(&self, player: Player) -> Result<(), StoreError> {
        self.players
            .write()
            .map_err(poisoned)?
            .insert(player.id.clone(), player);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.players.read().map(|players| players.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_where<F>(&self, predicate: F) -> Result<Option<Player>, StoreError>
    where
        F: Fn(&Player) -> bool,
    {
        let players = self.players.read().map_err(poisoned)?;
        Ok(players.values().find(|p| predicate(p)).cloned())
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Player>, StoreError> {
        let players = self.players.read().map_err(poisoned)?;
        Ok(players.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Player>, StoreError> {
        self.find_where(|p| p.email == email)
    }

    async fn find_by_provider_id(&self, provider_id: &str) -> Result<Option<Player>, StoreError> {
        self.find_where(|p| p.linked_provider_id() == Some(provider_id))
    }

    async fn create(&self, player: NewPlayer) -> Result<Player, StoreError> {
        let mut players = self.players.write().map_err(poisoned)?;

        if players.values().any(|p| p.email == player.email) {
            return Err(StoreError::UniqueViolation(Constraint::PlayerEmail));
        }
        if let Some(google_id) = player.google_id.as_deref().filter(|id| !id.is_empty()) {
            if players.values().any(|p| p.linked_provider_id() == Some(google_id)) {
                return Err(StoreError::UniqueViolation(Constraint::PlayerProviderId));
            }
        }

        let player = player.into_player(uuid::Uuid::new_v4().to_string());
        players.insert(player.id.clone(), player.clone());

        Ok(player)
    }

    async fn attach_provider_account(
        &self,
        player_id: &str,
        provider_id: &str,
        avatar_url: Option<&str>,
    ) -> Result<Player, StoreError> {
        let mut players = self.players.write().map_err(poisoned)?;

        if players
            .values()
            .any(|p| p.id != player_id && p.linked_provider_id() == Some(provider_id))
        {
            return Err(StoreError::UniqueViolation(Constraint::PlayerProviderId));
        }

        let player = players
            .get_mut(player_id)
            .ok_or_else(|| StoreError::Backend(format!("player {} disappeared during provider attach", player_id)))?;

        if player.linked_provider_id().is_some_and(|existing| existing != provider_id) {
            return Err(StoreError::UniqueViolation(Constraint::ProviderAlreadyAttached));
        }

        player.google_id = Some(provider_id.to_string());
        if let Some(avatar_url) = avatar_url {
            player.avatar_url = Some(avatar_url.to_string());
        }
        player.updated_at = Utc::now();

        Ok(player.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryModalityLinkStore {
    links: RwLock<Vec<PlayerModality>>,
}

impl InMemoryModalityLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(
        &self,
        player_id: &str,
        modality_id: &str,
        is_main: bool,
        quota: ModalityQuota,
    ) -> Result<PlayerModality, StoreError> {
        let mut links = self.links.write().map_err(poisoned)?;

        if links
            .iter()
            .any(|l| l.player_id == player_id && l.modality_id == modality_id)
        {
            return Err(StoreError::UniqueViolation(Constraint::PlayerModality));
        }
        let existing = links.iter().filter(|l| l.player_id == player_id).count() as u64;
        if !quota.allows_another(existing) {
            return Err(StoreError::UniqueViolation(Constraint::ModalityQuota));
        }
        if is_main && links.iter().any(|l| l.player_id == player_id && l.is_main) {
            return Err(StoreError::UniqueViolation(Constraint::MainModality));
        }

        let link = PlayerModality::new(uuid::Uuid::new_v4().to_string(), player_id, modality_id, is_main);
        links.push(link.clone());

        Ok(link)
    }
}

#[async_trait]
impl ModalityLinkStore for InMemoryModalityLinkStore {
    async fn has_link(&self, player_id: &str, modality_id: &str) -> Result<bool, StoreError> {
        let links = self.links.read().map_err(poisoned)?;
        Ok(links
            .iter()
            .any(|l| l.player_id == player_id && l.modality_id == modality_id))
    }

    async fn count_by_player(&self, player_id: &str) -> Result<u64, StoreError> {
        let links = self.links.read().map_err(poisoned)?;
        Ok(links.iter().filter(|l| l.player_id == player_id).count() as u64)
    }

    async fn create_as_main(
        &self,
        player_id: &str,
        modality_id: &str,
        quota: ModalityQuota,
    ) -> Result<PlayerModality, StoreError> {
        self.insert(player_id, modality_id, true, quota)
    }

    async fn create(
        &self,
        player_id: &str,
        modality_id: &str,
        quota: ModalityQuota,
    ) -> Result<PlayerModality, StoreError> {
        self.insert(player_id, modality_id, false, quota)
    }

    async fn list_by_player(&self, player_id: &str) -> Result<Vec<PlayerModality>, StoreError> {
        let links = self.links.read().map_err(poisoned)?;
        let mut owned: Vec<PlayerModality> = links
            .iter()
            .filter(|l| l.player_id == player_id)
            .cloned()
            .collect();
        // 안정 정렬이므로 메인이 아닌 연결은 삽입 순서를 유지
        owned.sort_by_key(|l| !l.is_main);
        Ok(owned)
    }
}
