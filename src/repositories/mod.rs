//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 서비스 계층은 구체 타입이 아니라 [`PlayerStore`](players::PlayerStore)와
//! [`ModalityLinkStore`](modalities::ModalityLinkStore) 트레이트에 의존합니다.
//! 실행 시점에 [`Stores`]가 설정에 맞는 구현체를 골라 묶어 줍니다.
//!
//! | 백엔드 | 플레이어 | 모달리티 연결 |
//! |--------|----------|---------------|
//! | `mongodb` | `MongoPlayerRepository` (+ Redis 캐시) | `MongoPlayerModalityRepository` |
//! | `memory` | `InMemoryPlayerStore` | `InMemoryModalityLinkStore` |
//!
//! # Examples
//!
//! ```rust,ignore
//! let stores = Stores::in_memory();
//! let service = ModalityService::new(stores.players.clone(), stores.links.clone());
//! ```

use std::sync::Arc;
use crate::caching::redis::RedisClient;
use crate::core::errors::AppError;
use crate::db::Database;

pub mod players;
pub mod modalities;
pub mod memory;

use memory::{InMemoryModalityLinkStore, InMemoryPlayerStore};
use modalities::{ModalityLinkStore, MongoPlayerModalityRepository};
use players::{MongoPlayerRepository, PlayerStore};

/// 서비스에 주입할 저장소 묶음
#[derive(Clone)]
pub struct Stores {
    pub players: Arc<dyn PlayerStore>,
    pub links: Arc<dyn ModalityLinkStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            players: Arc::new(InMemoryPlayerStore::new()),
            links: Arc::new(InMemoryModalityLinkStore::new()),
        }
    }

    /// MongoDB 저장소를 만들고 인덱스를 보장합니다.
    pub async fn mongodb(db: Arc<Database>, redis: Arc<RedisClient>) -> Result<Self, AppError> {
        let players = MongoPlayerRepository::new(db.clone(), redis);
        players.create_indexes().await?;

        let links = MongoPlayerModalityRepository::new(db);
        links.create_indexes().await?;

        log::info!("✅ MongoDB 인덱스 준비 완료");

        Ok(Self {
            players: Arc::new(players),
            links: Arc::new(links),
        })
    }
}
