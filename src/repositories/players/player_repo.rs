//! # 플레이어 리포지토리 구현
//!
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 조회 캐싱을 지원합니다.
//!
//! ## 캐싱 전략
//!
//! - **TTL**: 10분 (600초)
//! - **키 패턴**: `player:{id}`, `player:email:{email}`, `player:google:{google_id}`
//! - **쓰기 후 캐시 무효화**: 프로바이더 연결 시 해당 플레이어의 모든 키 삭제
//! - 캐시 장애는 무시하고 MongoDB 결과를 그대로 사용합니다.
//! - `find_by_id_fresh`는 캐시를 거치지 않습니다. 구독 플랜처럼 다른 서비스가
//!   바꿀 수 있는 값으로 한도를 판단하는 경로에서 사용합니다.
//!
//! ## 인덱스
//!
//! - `email_unique`: email (UNIQUE)
//! - `google_id_unique`: google_id (UNIQUE, 문자열 값이 있는 문서만)
//! - `created_at_desc`: created_at (내림차순)

use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::{IndexModel, bson::{Document, doc}, options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument}};
use crate::{
    caching::{self, redis::RedisClient},
    core::errors::{AppError, Constraint, ErrorContext, StoreError},
    db::{self, Database},
    domain::entities::players::{NewPlayer, Player},
    repositories::players::PlayerStore,
};

const COLLECTION: &str = "players";

const WRITE_CONSTRAINTS: &[Constraint] = &[Constraint::PlayerEmail, Constraint::PlayerProviderId];

pub struct MongoPlayerRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl MongoPlayerRepository {
    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        Self { db, redis }
    }

    fn collection(&self) -> mongodb::Collection<Player> {
        self.db.collection::<Player>(COLLECTION)
    }

    /// 캐시 우선 단건 조회
    async fn find_cached(&self, cache_key: &str, filter: Document) -> Result<Option<Player>, StoreError> {
        match self.redis.get::<Player>(cache_key).await {
            Ok(Some(cached)) => return Ok(Some(cached)),
            Ok(None) => {}
            Err(e) => log::debug!("플레이어 캐시 조회 실패 ({}): {}", cache_key, e),
        }

        let player = self.collection()
            .find_one(filter)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if let Some(ref player) = player {
            self.cache_player(player).await;
        }

        Ok(player)
    }

    async fn cache_player(&self, player: &Player) {
        for key in Self::cache_keys(player) {
            if let Err(e) = self.redis
                .set_with_expiry(&key, player, caching::PLAYER_CACHE_TTL_SECS)
                .await
            {
                log::debug!("플레이어 캐시 저장 실패 ({}): {}", key, e);
            }
        }
    }

    async fn invalidate_player(&self, player: &Player) {
        if let Err(e) = self.redis.del_multiple(&Self::cache_keys(player)).await {
            log::debug!("플레이어 캐시 무효화 실패 ({}): {}", player.id, e);
        }
    }

    fn cache_keys(player: &Player) -> Vec<String> {
        let mut keys = vec![
            caching::player_id_key(&player.id),
            caching::player_email_key(&player.email),
        ];
        if let Some(google_id) = player.linked_provider_id() {
            keys.push(caching::player_google_key(google_id));
        }
        keys
    }

    /// 플레이어 컬렉션 인덱스 생성
    ///
    /// 애플리케이션 시작 시 한 번 실행합니다. 유니크 인덱스는 동시 가입이나
    /// 동시 프로바이더 연결 경쟁에서 두 번째 쓰기를 거부하는 최종 방어선입니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(Constraint::PlayerEmail.to_string())
                .build())
            .build();

        let google_id_index = IndexModel::builder()
            .keys(doc! { "google_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(Constraint::PlayerProviderId.to_string())
                .partial_filter_expression(doc! { "google_id": { "$type": "string" } })
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, google_id_index, created_at_index])
            .await
            .with_context(|| format!("{}.{} 인덱스 생성 실패", self.db.database_name(), COLLECTION))?;

        Ok(())
    }
}

#[async_trait]
impl PlayerStore for MongoPlayerRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Player>, StoreError> {
        self.find_cached(&caching::player_id_key(id), doc! { "_id": id }).await
    }

    async fn find_by_id_fresh(&self, id: &str) -> Result<Option<Player>, StoreError> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Player>, StoreError> {
        self.find_cached(&caching::player_email_key(email), doc! { "email": email }).await
    }

    async fn find_by_provider_id(&self, provider_id: &str) -> Result<Option<Player>, StoreError> {
        self.find_cached(&caching::player_google_key(provider_id), doc! { "google_id": provider_id }).await
    }

    async fn create(&self, player: NewPlayer) -> Result<Player, StoreError> {
        let player = player.into_player(uuid::Uuid::new_v4().to_string());

        self.collection()
            .insert_one(&player)
            .await
            .map_err(|e| db::to_store_error(e, WRITE_CONSTRAINTS))?;

        Ok(player)
    }

    async fn attach_provider_account(
        &self,
        player_id: &str,
        provider_id: &str,
        avatar_url: Option<&str>,
    ) -> Result<Player, StoreError> {
        let updated_at = mongodb::bson::to_bson(&Utc::now())
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let mut set = doc! {
            "google_id": provider_id,
            "updated_at": updated_at,
        };
        if let Some(avatar_url) = avatar_url {
            set.insert("avatar_url", avatar_url);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        // 비어 있거나 같은 프로바이더 ID일 때만 쓴다
        let filter = doc! {
            "_id": player_id,
            "$or": [
                { "google_id": { "$exists": false } },
                { "google_id": null },
                { "google_id": "" },
                { "google_id": provider_id },
            ],
        };

        let updated = self.collection()
            .find_one_and_update(filter, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(|e| db::to_store_error(e, WRITE_CONSTRAINTS))?;

        let Some(updated) = updated else {
            return match self.find_by_id_fresh(player_id).await? {
                Some(current) => {
                    // 캐시가 연결 전 상태를 보여줬을 수 있다
                    self.invalidate_player(&current).await;
                    Err(StoreError::UniqueViolation(Constraint::ProviderAlreadyAttached))
                }
                None => Err(StoreError::Backend(format!("player {} disappeared during provider attach", player_id))),
            };
        };

        self.invalidate_player(&updated).await;

        Ok(updated)
    }
}
