//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 생성자로 저장소 트레이트 객체를 주입받습니다.
//! [`Services`]가 [`Stores`]로부터 전체 서비스를 한 번에 조립하고,
//! actix-web 애플리케이션 데이터로 등록합니다.
//!
//! `#[service]`/`#[repository]` 싱글톤 매크로는 `Arc<T>` 필드를 구체 타입
//! 기준으로 ServiceLocator에서 찾아 채웁니다. 여기서 저장소는
//! `Arc<dyn PlayerStore>`, `Arc<dyn ModalityLinkStore>`이고 구현체가
//! `STORE_BACKEND` 설정에 따라 실행 시점에 정해지므로, 타입으로 조회할 수
//! 있는 등록 키가 없습니다. 그래서 서비스는 싱글톤 대신 생성자로 저장소를
//! 받고, 테스트는 같은 생성자에 인메모리 저장소나 래퍼를 넘깁니다.
//!
//! # Features
//!
//! - 프로바이더 로그인 식별 및 계정 연결
//! - 플랜별 한도를 적용한 모달리티 할당
//! - 플레이어 조회
//!
//! # Examples
//!
//! ```rust,ignore
//! let services = Services::new(Stores::in_memory());
//!
//! App::new().configure(|cfg| services.configure(cfg));
//!
//! // 핸들러에서
//! async fn handler(modalities: web::Data<ModalityService>) { /* ... */ }
//! ```

use std::sync::Arc;
use actix_web::web;
use crate::repositories::Stores;

pub mod auth;
pub mod modalities;
pub mod players;

use auth::ProviderAuthService;
use modalities::ModalityService;
use players::PlayerService;

/// 애플리케이션 전체에서 공유하는 서비스 묶음
#[derive(Clone)]
pub struct Services {
    pub provider_auth: Arc<ProviderAuthService>,
    pub modalities: Arc<ModalityService>,
    pub players: Arc<PlayerService>,
}

impl Services {
    pub fn new(stores: Stores) -> Self {
        Self {
            provider_auth: Arc::new(ProviderAuthService::new(stores.players.clone())),
            modalities: Arc::new(ModalityService::new(stores.players.clone(), stores.links.clone())),
            players: Arc::new(PlayerService::new(stores.players)),
        }
    }

    /// 각 서비스를 `web::Data<T>`로 등록합니다.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.provider_auth.clone()))
            .app_data(web::Data::from(self.modalities.clone()))
            .app_data(web::Data::from(self.players.clone()));
    }
}
