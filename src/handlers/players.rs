//! # Player HTTP Handlers
//!
//! 플레이어 조회와 모달리티 연결 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/players/{id}` | 플레이어 조회 | 200 OK |
//! | `GET` | `/players/{id}/modalities` | 모달리티 연결 목록 (메인 먼저) | 200 OK |
//! | `POST` | `/players/{id}/modalities` | 모달리티 연결 | 201 Created |
//!
//! 비즈니스 규칙 위반(중복 연결, 플랜 한도 초과)은 `422`, 메인 모달리티 동시 생성
//! 충돌은 `409`, 존재하지 않는 플레이어는 `404`로 응답합니다.

use actix_web::{web, HttpResponse, get, post};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::modalities::{AddModalityRequest, PlayerModalityResponse};
use crate::services::{modalities::ModalityService, players::PlayerService};

/// 플레이어 조회 핸들러
///
/// # 엔드포인트
///
/// `GET /players/{player_id}`
///
/// 응답에는 비밀번호 해시가 포함되지 않습니다.
#[get("/{player_id}")]
pub async fn get_player(
    player_id: web::Path<String>,
    service: web::Data<PlayerService>,
) -> Result<HttpResponse, AppError> {
    let player = service.get_player(&player_id).await?;
    Ok(HttpResponse::Ok().json(player))
}

/// 모달리티 연결 목록 핸들러
#[get("/{player_id}/modalities")]
pub async fn list_modalities(
    player_id: web::Path<String>,
    service: web::Data<ModalityService>,
) -> Result<HttpResponse, AppError> {
    let links: Vec<PlayerModalityResponse> = service
        .list_modalities(&player_id)
        .await?
        .into_iter()
        .map(PlayerModalityResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(links))
}

/// 모달리티 연결 핸들러
///
/// # 엔드포인트
///
/// `POST /players/{player_id}/modalities`
///
/// # 요청 본문
///
/// ```json
/// { "modality_id": "football" }
/// ```
///
/// # 응답
///
/// ## 성공 (201 Created)
/// ```json
/// {
///   "id": "0b6f...",
///   "player_id": "p1",
///   "modality_id": "football",
///   "is_main": true,
///   "created_at": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// ## 한도 초과 (422 Unprocessable Entity)
/// ```json
/// { "error": "Business rule violation: Modality limit reached." }
/// ```
#[post("/{player_id}/modalities")]
pub async fn add_modality(
    player_id: web::Path<String>,
    payload: web::Json<AddModalityRequest>,
    service: web::Data<ModalityService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let modality_id = payload.modality_id.trim();
    let link = service.add_modality(&player_id, modality_id).await?;

    Ok(HttpResponse::Created().json(PlayerModalityResponse::from(link)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::{http::StatusCode, test, App};
    use crate::domain::dto::players::PlayerResponse;
    use crate::domain::entities::players::SubscriptionPlan;
    use crate::repositories::memory::{InMemoryModalityLinkStore, InMemoryPlayerStore};
    use crate::repositories::Stores;
    use crate::services::Services;
    use crate::test_support::seed_player;

    fn services_with_player(plan: SubscriptionPlan) -> Services {
        let players = Arc::new(InMemoryPlayerStore::new());
        seed_player(&players, "p1", "p1@x.com", plan, None);
        Services::new(Stores {
            players,
            links: Arc::new(InMemoryModalityLinkStore::new()),
        })
    }

    macro_rules! init_app {
        ($services:expr) => {{
            let services = $services;
            test::init_service(
                App::new()
                    .configure(|cfg| services.configure(cfg))
                    .service(
                        web::scope("/players")
                            .service(get_player)
                            .service(list_modalities)
                            .service(add_modality),
                    ),
            )
            .await
        }};
    }

    fn add_request(player_id: &str, modality_id: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri(&format!("/players/{}/modalities", player_id))
            .set_json(serde_json::json!({ "modality_id": modality_id }))
    }

    #[actix_web::test]
    async fn test_free_plan_flow_over_http() {
        let app = init_app!(services_with_player(SubscriptionPlan::Free));

        let resp = test::call_service(&app, add_request("p1", "m1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let first: PlayerModalityResponse = test::read_body_json(resp).await;
        assert!(first.is_main);

        let resp = test::call_service(&app, add_request("p1", "m2").to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let second: PlayerModalityResponse = test::read_body_json(resp).await;
        assert!(!second.is_main);

        let resp = test::call_service(&app, add_request("p1", "m3").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("Modality limit reached."));

        let req = test::TestRequest::get().uri("/players/p1/modalities").to_request();
        let links: Vec<PlayerModalityResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(links, vec![first, second]);
    }

    #[actix_web::test]
    async fn test_duplicate_link_is_unprocessable() {
        let app = init_app!(services_with_player(SubscriptionPlan::Pro));

        let resp = test::call_service(&app, add_request("p1", "m1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(&app, add_request("p1", "m1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_unknown_player_is_not_found() {
        let app = init_app!(services_with_player(SubscriptionPlan::Free));

        let resp = test::call_service(&app, add_request("missing", "m1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/players/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_blank_modality_id_is_bad_request() {
        let app = init_app!(services_with_player(SubscriptionPlan::Free));

        let resp = test::call_service(&app, add_request("p1", "   ").to_request()).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_get_player_hides_password() {
        let app = init_app!(services_with_player(SubscriptionPlan::Premium));

        let req = test::TestRequest::get().uri("/players/p1").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(body.get("password_hash").is_none());
        let player: PlayerResponse = serde_json::from_value(body).unwrap();
        assert_eq!(player.id, "p1");
        assert_eq!(player.subscription_plan, SubscriptionPlan::Premium);
    }
}
