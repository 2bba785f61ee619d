//! 플레이어 계정 서비스 백엔드
//!
//! 플레이어 계정과 외부 프로바이더(Google) 로그인 식별, 그리고 구독 플랜에 따른
//! 모달리티 할당을 담당하는 서비스입니다.
//!
//! # Features
//!
//! - **프로바이더 로그인 식별**: 프로바이더 ID → 이메일 → 신규 생성 순서로 계정 결정
//! - **모달리티 할당**: 플랜별 한도, 중복 방지, 첫 연결의 메인 지정
//! - **저장소 추상화**: `PlayerStore` / `ModalityLinkStore` 트레이트 (MongoDB 또는 메모리)
//! - **Redis**: 플레이어 조회 캐시
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (+ 내부 API 키 미들웨어)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증 / 응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 식별 결정, 할당 규칙
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     Stores      │ ← PlayerStore / ModalityLinkStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 또는 InMemory
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use player_account_service::repositories::Stores;
//! use player_account_service::services::Services;
//!
//! let services = Services::new(Stores::in_memory());
//! let player = services.provider_auth.authenticate_with_provider(request).await?;
//! let link = services.modalities.add_modality(&player.id, "football").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(test)]
pub(crate) mod test_support;
