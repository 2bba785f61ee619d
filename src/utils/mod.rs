//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 이메일 정규화
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{normalize_email, validate_required_string};
//!
//! let email = normalize_email("  Player@Example.com ")?;   // "player@example.com"
//! let name = validate_required_string("  John  ", "name")?; // "John"
//! ```

pub mod string_utils;
