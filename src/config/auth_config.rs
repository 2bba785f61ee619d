//! 내부 호출자 인증 설정
//!
//! 프로바이더 로그인 엔드포인트는 OAuth 핸드셰이크를 이미 끝낸 게이트웨이만
//! 호출할 수 있습니다. 게이트웨이는 `X-Internal-Api-Key` 헤더로 공유 키를 전달합니다.

use std::env;
use crate::config::Environment;

/// 내부 API 키를 담는 헤더 이름
pub const INTERNAL_API_KEY_HEADER: &str = "X-Internal-Api-Key";

const DEV_INTERNAL_API_KEY: &str = "dev-internal-key";

pub struct InternalApiConfig;

impl InternalApiConfig {
    /// 내부 API 키를 반환합니다.
    ///
    /// `INTERNAL_API_KEY`가 설정되지 않은 경우 개발/테스트 환경에서만
    /// 기본 키를 사용하고, 그 외 환경에서는 에러를 반환합니다.
    pub fn api_key() -> Result<String, String> {
        Self::resolve(env::var("INTERNAL_API_KEY").ok(), &Environment::current())
    }

    fn resolve(configured: Option<String>, environment: &Environment) -> Result<String, String> {
        match configured.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            Some(key) => Ok(key),
            None if environment.allows_insecure_defaults() => {
                log::warn!("INTERNAL_API_KEY not set, using default (not secure for production!)");
                Ok(DEV_INTERNAL_API_KEY.to_string())
            }
            None => Err(format!("INTERNAL_API_KEY must be set in {:?}", environment)),
        }
    }
}
