//! # Domain Models Module
//!
//! 영속화되지 않는 도메인 모델과 값 객체를 정의하는 모듈입니다.
//!
//! ## Entities vs Models 구분
//!
//! - **Entities** (`../entities/`): 저장소에 저장되는 객체 (`Player`, `PlayerModality`)
//! - **Models** (`./`): 비즈니스 결정을 표현하는 값 객체 (`IdentityMatch`)

pub mod identity;

pub use identity::*;
