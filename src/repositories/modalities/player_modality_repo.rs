//! # 플레이어 모달리티 리포지토리 구현
//!
//! `player_modalities` 컬렉션에 연결을 저장합니다. 캐시는 사용하지 않습니다.
//! 연결 수 조회는 한도 판단에 쓰이므로 항상 최신 값을 읽어야 합니다.
//!
//! ## 인덱스
//!
//! - `player_modality_unique`: (player_id, modality_id) UNIQUE
//! - `main_modality_unique`: player_id UNIQUE, `is_main: true`인 문서만
//!
//! 두 인덱스가 중복 연결과 메인 중복을 막습니다.
//!
//! ## 플랜 한도
//!
//! 한도는 인덱스로 표현할 수 없으므로 `player_modality_counters` 컬렉션에
//! 플레이어별 연결 수를 둡니다. 연결을 쓰기 전에 조건부 `$inc`
//! (`{ _id, count: { $lt: limit } }`)로 자리를 먼저 확보하며, 일치하는 문서가
//! 없으면 한도 초과입니다. 단일 문서 갱신은 원자적이므로 동시 요청 중 하나만
//! 마지막 자리를 얻습니다. 연결 삽입이 실패하면 확보한 자리를 반환합니다.
//!
//! ```text
//! reserve_slot ── 실패 ──▶ UniqueViolation(ModalityQuota)
//!      │ 성공
//!      ▼
//! insert_one ──── 실패 ──▶ release_slot, 원래 에러 반환
//!      │ 성공
//!      ▼
//!   PlayerModality
//! ```

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::{Document, doc}, options::{IndexOptions, UpdateOptions}};
use crate::{
    core::errors::{AppError, Constraint, ErrorContext, StoreError},
    db::{self, Database},
    domain::entities::{modalities::PlayerModality, players::ModalityQuota},
    repositories::modalities::ModalityLinkStore,
};

const COLLECTION: &str = "player_modalities";
const COUNTER_COLLECTION: &str = "player_modality_counters";

const WRITE_CONSTRAINTS: &[Constraint] = &[Constraint::PlayerModality, Constraint::MainModality];

pub struct MongoPlayerModalityRepository {
    db: Arc<Database>,
}

impl MongoPlayerModalityRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<PlayerModality> {
        self.db.collection::<PlayerModality>(COLLECTION)
    }

    fn counters(&self) -> mongodb::Collection<Document> {
        self.db.collection::<Document>(COUNTER_COLLECTION)
    }

    async fn insert(
        &self,
        player_id: &str,
        modality_id: &str,
        is_main: bool,
        quota: ModalityQuota,
    ) -> Result<PlayerModality, StoreError> {
        self.reserve_slot(player_id, quota).await?;

        let link = PlayerModality::new(uuid::Uuid::new_v4().to_string(), player_id, modality_id, is_main);

        if let Err(e) = self.collection().insert_one(&link).await {
            self.release_slot(player_id).await;
            return Err(db::to_store_error(e, WRITE_CONSTRAINTS));
        }

        Ok(link)
    }

    /// 카운터 문서를 보장한 뒤 한도 안에서만 연결 수를 1 늘립니다.
    async fn reserve_slot(&self, player_id: &str, quota: ModalityQuota) -> Result<(), StoreError> {
        let existing = self.count_by_player(player_id).await?;
        let upsert = UpdateOptions::builder().upsert(true).build();

        self.counters()
            .update_one(
                doc! { "_id": player_id },
                doc! { "$setOnInsert": { "count": existing as i64 } },
            )
            .with_options(upsert)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let filter = match quota {
            ModalityQuota::Limited(limit) => doc! { "_id": player_id, "count": { "$lt": limit as i64 } },
            ModalityQuota::Unlimited => doc! { "_id": player_id },
        };

        let result = self.counters()
            .update_one(filter, doc! { "$inc": { "count": 1 } })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(StoreError::UniqueViolation(Constraint::ModalityQuota));
        }

        Ok(())
    }

    async fn release_slot(&self, player_id: &str) {
        if let Err(e) = self.counters()
            .update_one(doc! { "_id": player_id }, doc! { "$inc": { "count": -1 } })
            .await
        {
            log::error!("모달리티 카운터 복구 실패 (player={}): {}", player_id, e);
        }
    }

    /// 연결 컬렉션 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "player_id": 1, "modality_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(Constraint::PlayerModality.to_string())
                .build())
            .build();

        let main_index = IndexModel::builder()
            .keys(doc! { "player_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(Constraint::MainModality.to_string())
                .partial_filter_expression(doc! { "is_main": true })
                .build())
            .build();

        self.collection()
            .create_indexes([pair_index, main_index])
            .await
            .with_context(|| format!("{}.{} 인덱스 생성 실패", self.db.database_name(), COLLECTION))?;

        Ok(())
    }
}

#[async_trait]
impl ModalityLinkStore for MongoPlayerModalityRepository {
    async fn has_link(&self, player_id: &str, modality_id: &str) -> Result<bool, StoreError> {
        let link = self.collection()
            .find_one(doc! { "player_id": player_id, "modality_id": modality_id })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(link.is_some())
    }

    async fn count_by_player(&self, player_id: &str) -> Result<u64, StoreError> {
        self.collection()
            .count_documents(doc! { "player_id": player_id })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn create_as_main(
        &self,
        player_id: &str,
        modality_id: &str,
        quota: ModalityQuota,
    ) -> Result<PlayerModality, StoreError> {
        self.insert(player_id, modality_id, true, quota).await
    }

    async fn create(
        &self,
        player_id: &str,
        modality_id: &str,
        quota: ModalityQuota,
    ) -> Result<PlayerModality, StoreError> {
        self.insert(player_id, modality_id, false, quota).await
    }

    async fn list_by_player(&self, player_id: &str) -> Result<Vec<PlayerModality>, StoreError> {
        self.collection()
            .find(doc! { "player_id": player_id })
            .sort(doc! { "is_main": -1, "created_at": 1 })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
