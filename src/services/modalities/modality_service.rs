//! # 모달리티 할당 서비스
//!
//! 플레이어에게 모달리티를 연결할 수 있는지, 그리고 그 연결이 메인 모달리티가
//! 되는지를 결정합니다.
//!
//! ## 검사 순서
//!
//! 여러 조건이 동시에 성립할 때 어떤 에러가 나가는지는 아래 순서로 정해집니다.
//!
//! ```text
//! 1. 플레이어 존재?            ── 아니오 ──▶ NotFound("Player")
//! 2. 이미 연결된 쌍?           ── 예 ──────▶ BusinessRuleError("Modality already linked.")
//! 3. 연결 수 < 플랜 한도?      ── 아니오 ──▶ BusinessRuleError("Modality limit reached.")
//! 4. 연결 수 == 0 ?            ── 예 ──────▶ create_as_main
//!                              ── 아니오 ──▶ create
//! ```
//!
//! 1~3은 읽기만 수행하며, 성공 시에만 단 한 번 쓰기가 일어납니다.
//! 메인 여부는 결정 시점의 연결 수로 정해지고 생성 후 다시 계산하지 않습니다.
//!
//! ## 동시성
//!
//! 저장소가 유니크 제약 위반을 보고하면 같은 의미의 비즈니스 에러로 번역합니다.
//! 재시도는 하지 않습니다.
//!
//! | 저장소 제약 | 결과 |
//! |-------------|------|
//! | `PlayerModality` | `BusinessRuleError("Modality already linked.")` |
//! | `MainModality` | `ConflictError("Main modality already assigned.")` |
//! | `ModalityQuota` | `BusinessRuleError("Modality limit reached.")` |
//!
//! 3번 한도 검사는 빠른 거부용입니다. 저장소는 같은 한도를 쓰기 시점에 다시
//! 원자적으로 검사하므로, 동시 요청이 모두 3번을 통과해도 한도를 넘는 연결은
//! 생성되지 않습니다.
//!
//! 플레이어는 캐시를 거치지 않고 읽습니다. 다른 서비스가 플랜을 바꾸면 다음
//! 요청부터 바로 반영됩니다.

use std::sync::Arc;
use crate::{
    core::errors::{AppError, AppResult, Constraint, StoreError},
    domain::entities::{modalities::PlayerModality, players::ModalityQuota},
    repositories::{modalities::ModalityLinkStore, players::PlayerStore},
};

pub const ALREADY_LINKED: &str = "Modality already linked.";
pub const LIMIT_REACHED: &str = "Modality limit reached.";
pub const MAIN_ALREADY_ASSIGNED: &str = "Main modality already assigned.";

pub struct ModalityService {
    player_store: Arc<dyn PlayerStore>,
    link_store: Arc<dyn ModalityLinkStore>,
}

impl ModalityService {
    pub fn new(player_store: Arc<dyn PlayerStore>, link_store: Arc<dyn ModalityLinkStore>) -> Self {
        Self {
            player_store,
            link_store,
        }
    }

    /// 플레이어에게 모달리티를 연결합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(PlayerModality)` - 생성된 연결 (첫 연결이면 `is_main = true`)
    /// * `Err(AppError::NotFound)` - 플레이어 없음
    /// * `Err(AppError::BusinessRuleError)` - 중복 연결 또는 플랜 한도 초과
    /// * `Err(AppError::ConflictError)` - 동시 요청이 먼저 메인 모달리티를 만듦
    /// * `Err(AppError::DatabaseError)` - 저장소 장애
    pub async fn add_modality(&self, player_id: &str, modality_id: &str) -> AppResult<PlayerModality> {
        let player = self.player_store
            .find_by_id_fresh(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Player".to_string()))?;

        if self.link_store.has_link(player_id, modality_id).await? {
            log::warn!("모달리티 중복 연결 거부: player={} modality={}", player_id, modality_id);
            return Err(AppError::BusinessRuleError(ALREADY_LINKED.to_string()));
        }

        let quota = player.subscription_plan.modality_quota();
        let existing = self.link_store.count_by_player(player_id).await?;
        if !quota.allows_another(existing) {
            log::warn!(
                "모달리티 한도 초과: player={} plan={} existing={}",
                player_id,
                player.subscription_plan.as_str(),
                existing
            );
            return Err(AppError::BusinessRuleError(LIMIT_REACHED.to_string()));
        }

        let created = if existing == 0 {
            self.link_store.create_as_main(player_id, modality_id, quota).await
        } else {
            self.link_store.create(player_id, modality_id, quota).await
        }
        .map_err(translate_link_error)?;

        log::info!(
            "모달리티 연결 생성: player={} modality={} main={}",
            created.player_id,
            created.modality_id,
            created.is_main
        );

        Ok(created)
    }

    /// 플레이어의 모달리티 연결 목록 (메인 먼저)
    pub async fn list_modalities(&self, player_id: &str) -> AppResult<Vec<PlayerModality>> {
        if self.player_store.find_by_id(player_id).await?.is_none() {
            return Err(AppError::NotFound("Player".to_string()));
        }

        Ok(self.link_store.list_by_player(player_id).await?)
    }
}

fn translate_link_error(err: StoreError) -> AppError {
    match err {
        StoreError::UniqueViolation(Constraint::PlayerModality) => {
            AppError::BusinessRuleError(ALREADY_LINKED.to_string())
        }
        StoreError::UniqueViolation(Constraint::MainModality) => {
            AppError::ConflictError(MAIN_ALREADY_ASSIGNED.to_string())
        }
        StoreError::UniqueViolation(Constraint::ModalityQuota) => {
            AppError::BusinessRuleError(LIMIT_REACHED.to_string())
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures_util::future::join;
    use crate::domain::entities::players::{NewPlayer, Player, SubscriptionPlan};
    use crate::repositories::memory::{InMemoryModalityLinkStore, InMemoryPlayerStore};
    use crate::test_support::{player, seed_player};

    fn service_with(plan: SubscriptionPlan) -> (ModalityService, Arc<InMemoryModalityLinkStore>) {
        let players = Arc::new(InMemoryPlayerStore::new());
        seed_player(&players, "p1", "p1@x.com", plan, None);
        let links = Arc::new(InMemoryModalityLinkStore::new());
        (ModalityService::new(players, links.clone()), links)
    }

    /// `has_link`가 항상 false를 돌려주는 저장소 (동시 요청이 검사 이후에 끼어든 상황)
    struct StaleHasLinkStore(InMemoryModalityLinkStore);

    #[async_trait]
    impl ModalityLinkStore for StaleHasLinkStore {
        async fn has_link(&self, _: &str, _: &str) -> Result<bool, StoreError> {
            Ok(false)
        }
        async fn count_by_player(&self, player_id: &str) -> Result<u64, StoreError> {
            self.0.count_by_player(player_id).await
        }
        async fn create_as_main(&self, player_id: &str, modality_id: &str, quota: ModalityQuota) -> Result<PlayerModality, StoreError> {
            self.0.create_as_main(player_id, modality_id, quota).await
        }
        async fn create(&self, player_id: &str, modality_id: &str, quota: ModalityQuota) -> Result<PlayerModality, StoreError> {
            self.0.create(player_id, modality_id, quota).await
        }
        async fn list_by_player(&self, player_id: &str) -> Result<Vec<PlayerModality>, StoreError> {
            self.0.list_by_player(player_id).await
        }
    }

    /// 연결 수를 항상 0으로 읽는 저장소 (두 요청이 동시에 첫 연결을 시도한 상황)
    struct StaleCountStore(InMemoryModalityLinkStore);

    #[async_trait]
    impl ModalityLinkStore for StaleCountStore {
        async fn has_link(&self, player_id: &str, modality_id: &str) -> Result<bool, StoreError> {
            self.0.has_link(player_id, modality_id).await
        }
        async fn count_by_player(&self, _: &str) -> Result<u64, StoreError> {
            Ok(0)
        }
        async fn create_as_main(&self, player_id: &str, modality_id: &str, quota: ModalityQuota) -> Result<PlayerModality, StoreError> {
            self.0.create_as_main(player_id, modality_id, quota).await
        }
        async fn create(&self, player_id: &str, modality_id: &str, quota: ModalityQuota) -> Result<PlayerModality, StoreError> {
            self.0.create(player_id, modality_id, quota).await
        }
        async fn list_by_player(&self, player_id: &str) -> Result<Vec<PlayerModality>, StoreError> {
            self.0.list_by_player(player_id).await
        }
    }

    /// 연결 수를 읽은 뒤 실행을 양보하는 저장소 (두 요청의 검사가 겹치는 상황)
    struct YieldingCountStore(InMemoryModalityLinkStore);

    #[async_trait]
    impl ModalityLinkStore for YieldingCountStore {
        async fn has_link(&self, player_id: &str, modality_id: &str) -> Result<bool, StoreError> {
            self.0.has_link(player_id, modality_id).await
        }
        async fn count_by_player(&self, player_id: &str) -> Result<u64, StoreError> {
            let count = self.0.count_by_player(player_id).await?;
            actix_web::rt::task::yield_now().await;
            Ok(count)
        }
        async fn create_as_main(&self, player_id: &str, modality_id: &str, quota: ModalityQuota) -> Result<PlayerModality, StoreError> {
            self.0.create_as_main(player_id, modality_id, quota).await
        }
        async fn create(&self, player_id: &str, modality_id: &str, quota: ModalityQuota) -> Result<PlayerModality, StoreError> {
            self.0.create(player_id, modality_id, quota).await
        }
        async fn list_by_player(&self, player_id: &str) -> Result<Vec<PlayerModality>, StoreError> {
            self.0.list_by_player(player_id).await
        }
    }

    /// 캐시된 조회는 유료 플랜, 원본 조회는 무료 플랜을 돌려주는 저장소 (플랜 다운그레이드 직후)
    struct DowngradedPlayerStore {
        cached: Player,
        current: Player,
    }

    #[async_trait]
    impl PlayerStore for DowngradedPlayerStore {
        async fn find_by_id(&self, _: &str) -> Result<Option<Player>, StoreError> {
            Ok(Some(self.cached.clone()))
        }
        async fn find_by_id_fresh(&self, _: &str) -> Result<Option<Player>, StoreError> {
            Ok(Some(self.current.clone()))
        }
        async fn find_by_email(&self, _: &str) -> Result<Option<Player>, StoreError> {
            Ok(None)
        }
        async fn find_by_provider_id(&self, _: &str) -> Result<Option<Player>, StoreError> {
            Ok(None)
        }
        async fn create(&self, _: NewPlayer) -> Result<Player, StoreError> {
            Err(StoreError::Backend("read only".to_string()))
        }
        async fn attach_provider_account(&self, _: &str, _: &str, _: Option<&str>) -> Result<Player, StoreError> {
            Err(StoreError::Backend("read only".to_string()))
        }
    }

    /// 모든 호출이 실패하는 저장소
    struct UnavailableLinkStore;

    #[async_trait]
    impl ModalityLinkStore for UnavailableLinkStore {
        async fn has_link(&self, _: &str, _: &str) -> Result<bool, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        async fn count_by_player(&self, _: &str) -> Result<u64, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        async fn create_as_main(&self, _: &str, _: &str, _: ModalityQuota) -> Result<PlayerModality, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        async fn create(&self, _: &str, _: &str, _: ModalityQuota) -> Result<PlayerModality, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        async fn list_by_player(&self, _: &str) -> Result<Vec<PlayerModality>, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
    }

    #[actix_web::test]
    async fn test_free_player_end_to_end() {
        let (service, links) = service_with(SubscriptionPlan::Free);

        let first = service.add_modality("p1", "m1").await.unwrap();
        assert_eq!((first.player_id.as_str(), first.modality_id.as_str(), first.is_main), ("p1", "m1", true));

        let second = service.add_modality("p1", "m2").await.unwrap();
        assert_eq!((second.modality_id.as_str(), second.is_main), ("m2", false));

        let err = service.add_modality("p1", "m3").await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRuleError(ref msg) if msg == LIMIT_REACHED));
        assert_eq!(links.count_by_player("p1").await.unwrap(), 2);
    }

    #[actix_web::test]
    async fn test_first_link_is_the_only_main() {
        let (service, links) = service_with(SubscriptionPlan::Premium);

        service.add_modality("p1", "m1").await.unwrap();
        let listed = links.list_by_player("p1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_main);

        for modality in ["m2", "m3", "m4"] {
            assert!(!service.add_modality("p1", modality).await.unwrap().is_main);
        }

        let listed = links.list_by_player("p1").await.unwrap();
        assert_eq!(listed.iter().filter(|l| l.is_main).count(), 1);
        assert_eq!(listed[0].modality_id, "m1");
    }

    #[actix_web::test]
    async fn test_paid_plan_is_unbounded() {
        let (service, links) = service_with(SubscriptionPlan::Pro);

        for i in 0..10 {
            service.add_modality("p1", &format!("m{}", i)).await.unwrap();
        }

        assert_eq!(links.count_by_player("p1").await.unwrap(), 10);
    }

    #[actix_web::test]
    async fn test_missing_player_is_not_found() {
        let (service, links) = service_with(SubscriptionPlan::Free);

        let err = service.add_modality("ghost", "m1").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref entity) if entity == "Player"));
        assert_eq!(links.count_by_player("ghost").await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_duplicate_pair_is_rejected_once_linked() {
        let (service, links) = service_with(SubscriptionPlan::Free);
        service.add_modality("p1", "m1").await.unwrap();

        let err = service.add_modality("p1", "m1").await.unwrap_err();

        assert!(matches!(err, AppError::BusinessRuleError(ref msg) if msg == ALREADY_LINKED));
        assert_eq!(links.count_by_player("p1").await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_duplicate_check_precedes_quota_check() {
        let (service, _) = service_with(SubscriptionPlan::Free);
        service.add_modality("p1", "m1").await.unwrap();
        service.add_modality("p1", "m2").await.unwrap();

        // 한도에도 걸리지만 중복 연결이 먼저 보고됨
        let err = service.add_modality("p1", "m2").await.unwrap_err();

        assert!(matches!(err, AppError::BusinessRuleError(ref msg) if msg == ALREADY_LINKED));
    }

    #[actix_web::test]
    async fn test_racing_duplicate_surfaces_as_already_linked() {
        let players = Arc::new(InMemoryPlayerStore::new());
        seed_player(&players, "p1", "p1@x.com", SubscriptionPlan::Pro, None);
        let links = Arc::new(StaleHasLinkStore(InMemoryModalityLinkStore::new()));
        let service = ModalityService::new(players, links.clone());

        service.add_modality("p1", "m1").await.unwrap();
        let err = service.add_modality("p1", "m1").await.unwrap_err();

        assert!(matches!(err, AppError::BusinessRuleError(ref msg) if msg == ALREADY_LINKED));
        assert_eq!(links.count_by_player("p1").await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_racing_first_links_keep_a_single_main() {
        let players = Arc::new(InMemoryPlayerStore::new());
        seed_player(&players, "p1", "p1@x.com", SubscriptionPlan::Free, None);
        let links = Arc::new(StaleCountStore(InMemoryModalityLinkStore::new()));
        let service = ModalityService::new(players, links.clone());

        assert!(service.add_modality("p1", "m1").await.unwrap().is_main);
        let err = service.add_modality("p1", "m2").await.unwrap_err();

        assert!(matches!(err, AppError::ConflictError(ref msg) if msg == MAIN_ALREADY_ASSIGNED));
        assert_eq!(links.list_by_player("p1").await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_concurrent_adds_never_exceed_free_quota() {
        let players = Arc::new(InMemoryPlayerStore::new());
        seed_player(&players, "p1", "p1@x.com", SubscriptionPlan::Free, None);
        let links = Arc::new(YieldingCountStore(InMemoryModalityLinkStore::new()));
        let service = ModalityService::new(players, links.clone());
        service.add_modality("p1", "m1").await.unwrap();

        let (a, b) = join(service.add_modality("p1", "m2"), service.add_modality("p1", "m3")).await;

        assert_eq!(links.count_by_player("p1").await.unwrap(), 2);
        let rejected = [a, b].into_iter().filter_map(Result::err).collect::<Vec<_>>();
        assert_eq!(rejected.len(), 1);
        assert!(matches!(rejected[0], AppError::BusinessRuleError(ref msg) if msg == LIMIT_REACHED));
    }

    #[actix_web::test]
    async fn test_quota_uses_current_plan_not_cached_plan() {
        let service = ModalityService::new(
            Arc::new(DowngradedPlayerStore {
                cached: player("p1", "p1@x.com", SubscriptionPlan::Premium, None),
                current: player("p1", "p1@x.com", SubscriptionPlan::Free, None),
            }),
            Arc::new(InMemoryModalityLinkStore::new()),
        );

        service.add_modality("p1", "m1").await.unwrap();
        service.add_modality("p1", "m2").await.unwrap();
        let err = service.add_modality("p1", "m3").await.unwrap_err();

        assert!(matches!(err, AppError::BusinessRuleError(ref msg) if msg == LIMIT_REACHED));
    }

    #[actix_web::test]
    async fn test_store_fault_propagates() {
        let players = Arc::new(InMemoryPlayerStore::new());
        seed_player(&players, "p1", "p1@x.com", SubscriptionPlan::Free, None);
        let service = ModalityService::new(players, Arc::new(UnavailableLinkStore));

        let err = service.add_modality("p1", "m1").await.unwrap_err();

        assert!(matches!(err, AppError::DatabaseError(ref msg) if msg == "connection refused"));
    }

    #[actix_web::test]
    async fn test_list_modalities() {
        let (service, _) = service_with(SubscriptionPlan::Free);
        service.add_modality("p1", "m1").await.unwrap();
        service.add_modality("p1", "m2").await.unwrap();

        let listed = service.list_modalities("p1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].is_main);

        assert!(matches!(
            service.list_modalities("ghost").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
