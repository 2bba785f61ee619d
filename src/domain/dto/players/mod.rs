//! 플레이어 관련 요청/응답 DTO

pub mod request;
pub mod response;

pub use request::ProviderAuthRequest;
pub use response::{PlayerResponse, ProviderAuthResponse};
