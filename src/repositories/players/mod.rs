//! 플레이어 데이터 액세스 계층
//!
//! [`PlayerStore`]는 서비스 계층이 의존하는 저장소 계약이고,
//! [`MongoPlayerRepository`](player_repo::MongoPlayerRepository)는 MongoDB + Redis 캐시 구현체입니다.
//! 테스트와 로컬 개발에서는 [`InMemoryPlayerStore`](crate::repositories::memory::InMemoryPlayerStore)를 사용합니다.
//!
//! # 계약
//!
//! - 조회 결과가 없으면 에러가 아니라 `Ok(None)`을 반환합니다.
//! - 이메일/프로바이더 ID 유니크 제약 위반은
//!   [`StoreError::UniqueViolation`](crate::core::errors::StoreError::UniqueViolation)으로 보고합니다.

use async_trait::async_trait;
use crate::core::errors::StoreError;
use crate::domain::entities::players::{NewPlayer, Player};

pub mod player_repo;

pub use player_repo::MongoPlayerRepository;

#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Player>, StoreError>;

    /// 캐시를 거치지 않고 저장소의 현재 레코드를 읽습니다.
    ///
    /// 구독 플랜처럼 외부에서 바뀔 수 있는 값으로 쓰기 여부를 결정할 때 사용합니다.
    async fn find_by_id_fresh(&self, id: &str) -> Result<Option<Player>, StoreError> {
        self.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Player>, StoreError>;

    async fn find_by_provider_id(&self, provider_id: &str) -> Result<Option<Player>, StoreError>;

    /// 새 플레이어를 저장하고 ID가 할당된 레코드를 반환합니다.
    async fn create(&self, player: NewPlayer) -> Result<Player, StoreError>;

    /// 기존 플레이어에 프로바이더 ID를 연결합니다.
    ///
    /// `avatar_url`이 `None`이면 기존 아바타를 유지합니다.
    /// 같은 프로바이더 ID를 다시 연결하는 것은 허용되며 아바타만 갱신됩니다.
    ///
    /// - 다른 플레이어가 `provider_id`를 가지고 있으면 `UniqueViolation(PlayerProviderId)`
    /// - 대상 플레이어에 다른 프로바이더 ID가 이미 있으면 `UniqueViolation(ProviderAlreadyAttached)`
    /// - 플레이어가 없으면 `StoreError::Backend`
    async fn attach_provider_account(
        &self,
        player_id: &str,
        provider_id: &str,
        avatar_url: Option<&str>,
    ) -> Result<Player, StoreError>;
}
