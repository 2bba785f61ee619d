//! # Data Transfer Objects
//!
//! HTTP 경계에서 주고받는 요청/응답 구조체입니다.
//! 요청 DTO는 `validator`로 검증하고, 응답 DTO는 엔티티에서 민감한 필드를
//! 제거한 형태로 `From` 변환을 통해 생성합니다.

pub mod players;
pub mod modalities;

pub use players::{ProviderAuthRequest, PlayerResponse, ProviderAuthResponse};
pub use modalities::{AddModalityRequest, PlayerModalityResponse};
