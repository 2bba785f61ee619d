//! 플레이어-모달리티 연결 데이터 액세스 계층
//!
//! 메인 연결과 일반 연결은 서로 다른 생성 메서드로 만들어집니다.
//! 서비스는 생성 시점에 메인 여부를 결정하고, 저장소는 그 결정을
//! 단일 쓰기로 기록합니다. 생성 후 플래그를 따로 갱신하는 경로는 없습니다.
//!
//! # 계약
//!
//! - 같은 (player_id, modality_id) 쌍의 두 번째 쓰기는
//!   `StoreError::UniqueViolation(Constraint::PlayerModality)`로 거부됩니다.
//! - 이미 메인 연결이 있는 플레이어에 대한 `create_as_main`은
//!   `StoreError::UniqueViolation(Constraint::MainModality)`로 거부됩니다.
//! - 생성 메서드는 플랜 한도(`ModalityQuota`)를 함께 받고, 쓰기 시점의 연결 수가
//!   한도에 도달해 있으면 `StoreError::UniqueViolation(Constraint::ModalityQuota)`로
//!   거부합니다. 검사와 쓰기는 하나의 원자적 단위입니다.

use async_trait::async_trait;
use crate::core::errors::StoreError;
use crate::domain::entities::modalities::PlayerModality;
use crate::domain::entities::players::ModalityQuota;

pub mod player_modality_repo;

pub use player_modality_repo::MongoPlayerModalityRepository;

#[async_trait]
pub trait ModalityLinkStore: Send + Sync {
    async fn has_link(&self, player_id: &str, modality_id: &str) -> Result<bool, StoreError>;

    async fn count_by_player(&self, player_id: &str) -> Result<u64, StoreError>;

    /// 메인 모달리티로 연결을 생성합니다.
    async fn create_as_main(
        &self,
        player_id: &str,
        modality_id: &str,
        quota: ModalityQuota,
    ) -> Result<PlayerModality, StoreError>;

    /// 일반(메인이 아닌) 연결을 생성합니다.
    async fn create(
        &self,
        player_id: &str,
        modality_id: &str,
        quota: ModalityQuota,
    ) -> Result<PlayerModality, StoreError>;

    /// 플레이어의 연결 목록 (메인 먼저, 이후 생성 순)
    async fn list_by_player(&self, player_id: &str) -> Result<Vec<PlayerModality>, StoreError>;
}
