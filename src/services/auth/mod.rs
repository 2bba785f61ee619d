//! 프로바이더 인증 서비스 모듈
//!
//! 게이트웨이가 끝낸 외부 프로바이더 로그인을 플레이어 계정으로 해석합니다.
//! 세션이나 토큰 발급은 이 서비스의 범위가 아닙니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::ProviderAuthService;
//!
//! let service = ProviderAuthService::new(stores.players.clone());
//! let player = service.authenticate_with_provider(request).await?;
//! ```

pub mod provider_auth_service;

pub use provider_auth_service::ProviderAuthService;
