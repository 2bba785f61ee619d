//! # Domain Layer
//!
//! 플레이어 계정 도메인의 엔티티, 도메인 모델, DTO를 정의합니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/   ← 영속성 엔티티 (Player, PlayerModality)
//! ├── models/     ← 도메인 모델 & 값 객체 (IdentityMatch)
//! └── dto/        ← 데이터 전송 객체 (요청 검증, 응답 변환)
//! ```

pub mod entities;
pub mod dto;
pub mod models;
