//! 모달리티 할당 서비스 모듈
//!
//! 플랜별 한도와 메인 모달리티 규칙을 적용해 플레이어-모달리티 연결을 만듭니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::modalities::ModalityService;
//!
//! let service = ModalityService::new(stores.players.clone(), stores.links.clone());
//! let link = service.add_modality("player-1", "football").await?;
//! assert!(link.is_main);
//! ```

pub mod modality_service;

pub use modality_service::ModalityService;
