//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청 DTO를 검증한 뒤 `web::Data`로 주입된 서비스를 호출하고,
//! 서비스의 [`AppError`](crate::core::errors::AppError)는 `ResponseError` 구현을 통해
//! 그대로 HTTP 상태 코드로 변환됩니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Gateway / Client
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Stores - PlayerStore / ModalityLinkStore       ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`players`**: 플레이어 조회와 모달리티 연결
//!   - `GET /players/{id}`
//!   - `GET /players/{id}/modalities`
//!   - `POST /players/{id}/modalities`
//! - **`auth`**: 게이트웨이 전용 프로바이더 로그인
//!   - `POST /internal/auth/google`

pub mod players;
pub mod auth;
