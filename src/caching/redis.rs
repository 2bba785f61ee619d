//! # Redis 캐시 클라이언트 구현
//!
//! 플레이어 조회 결과를 캐싱하는 Redis 클라이언트입니다.
//! 값은 JSON으로 직렬화하여 저장하며, 멀티플렉싱 연결을 사용합니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use crate::config::StoreConfig;

#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 PING으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(StoreConfig::redis_url())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set_ex(key, json, seconds).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }
}
