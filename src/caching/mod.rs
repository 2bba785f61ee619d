//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 플레이어 조회 캐시를 제공합니다.
//!
//! # 캐시 키
//!
//! | 키 | 내용 |
//! |----|------|
//! | `player:{id}` | ID 조회 결과 |
//! | `player:email:{email}` | 이메일 조회 결과 |
//! | `player:google:{google_id}` | 프로바이더 ID 조회 결과 |
//!
//! 모든 키는 10분 TTL을 가지며, 플레이어 레코드가 바뀌면 관련 키가 모두 삭제됩니다.
//! 캐시 장애는 조회 실패로 이어지지 않습니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;

/// 캐시 항목 TTL (초)
pub const PLAYER_CACHE_TTL_SECS: u64 = 600;

pub fn player_id_key(id: &str) -> String {
    format!("player:{}", id)
}

pub fn player_email_key(email: &str) -> String {
    format!("player:email:{}", email)
}

pub fn player_google_key(google_id: &str) -> String {
    format!("player:google:{}", google_id)
}
