//! # Core Module
//!
//! 서비스 전역에서 쓰이는 에러 타입을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 상태 코드 자동 매핑
//! - **StoreError / Constraint**: 저장소가 보고하는 유니크 제약 위반과 장애
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn get_player(id: &str) -> AppResult<Player> {
//!     store.find_by_id(id).await?
//!         .ok_or_else(|| AppError::NotFound("Player".to_string()))
//! }
//! ```

pub mod errors;

pub use errors::*;
