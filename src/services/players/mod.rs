//! 플레이어 조회 서비스 모듈

pub mod player_service;

pub use player_service::PlayerService;
