//! HTTP 미들웨어 모듈
//!
//! - [`InternalApiKeyMiddleware`] - 내부 게이트웨이 전용 스코프를 공유 키로 보호

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::InternalApiKeyMiddleware;
