//! 데이터 및 서버 설정 관리 모듈
//!
//! 저장소 백엔드, 서버 바인딩, 레이트 리밋, CORS 관련 설정을 관리합니다.

use std::env;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수에서 현재 환경을 읽습니다. 기본값은 Production입니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 개발용 기본값을 허용하는 환경인지 확인
    pub fn allows_insecure_defaults(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    pub fn workers() -> usize {
        env::var("WORKERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|w| *w > 0)
            .unwrap_or(4)
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 레이트 리밋 설정 (actix-governor)
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        Self { per_second, burst_size }
    }
}

/// 플레이어/모달리티 저장소 백엔드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB + Redis 캐시
    MongoDb,
    /// 프로세스 메모리 (개발/테스트용, 재시작 시 초기화)
    Memory,
}

impl StoreBackend {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(format!("Unsupported store backend: {}", other)),
        }
    }
}

pub struct StoreConfig;

impl StoreConfig {
    /// `STORE_BACKEND` 환경 변수 (기본값: mongodb)
    pub fn backend() -> Result<StoreBackend, String> {
        StoreBackend::from_str(&env::var("STORE_BACKEND").unwrap_or_else(|_| "mongodb".to_string()))
    }

    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "player_accounts_dev".to_string())
    }

    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }
}

pub struct CorsConfig;

impl CorsConfig {
    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분). 비어 있으면 로컬 개발 오리진을 사용합니다.
    pub fn allowed_origins() -> Vec<String> {
        let raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
        let origins = parse_origins(&raw);

        if origins.is_empty() {
            vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ]
        } else {
            origins
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
