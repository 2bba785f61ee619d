//! # Route Configuration
//!
//! 기능별 라우트를 하나의 애플리케이션에 등록합니다.
//!
//! | 스코프 | 보호 | 엔드포인트 |
//! |--------|------|-----------|
//! | `/health` | 없음 | 헬스체크 |
//! | `/api/v1/players` | 없음 | 플레이어 조회, 모달리티 연결 |
//! | `/api/v1/internal` | `X-Internal-Api-Key` | 프로바이더 로그인 |

use crate::handlers;
use crate::middlewares::InternalApiKeyMiddleware;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
/// * `internal_api_key` - 내부 스코프를 보호할 공유 키
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::App;
///
/// let app = App::new().configure(|cfg| configure_all_routes(cfg, &api_key));
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig, internal_api_key: &str) {
    // Health check endpoint
    cfg.service(health_check);

    configure_player_routes(cfg);
    configure_internal_routes(cfg, internal_api_key);
}

/// 플레이어 관련 라우트를 설정합니다
///
/// - `GET /api/v1/players/{player_id}` - 플레이어 조회
/// - `GET /api/v1/players/{player_id}/modalities` - 모달리티 연결 목록
/// - `POST /api/v1/players/{player_id}/modalities` - 모달리티 연결
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/players/p1/modalities \
///   -H "Content-Type: application/json" \
///   -d '{"modality_id":"football"}'
/// ```
fn configure_player_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/players")
            .service(handlers::players::get_player)
            .service(handlers::players::list_modalities)
            .service(handlers::players::add_modality)
    );
}

/// 게이트웨이 전용 라우트를 설정합니다
///
/// - `POST /api/v1/internal/auth/google` - 프로바이더 로그인
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/internal/auth/google \
///   -H "X-Internal-Api-Key: $INTERNAL_API_KEY" \
///   -H "Content-Type: application/json" \
///   -d '{"name":"A","email":"a@x.com","google_id":"g1","is_email_verified":true}'
/// ```
fn configure_internal_routes(cfg: &mut web::ServiceConfig, internal_api_key: &str) {
    cfg.service(
        web::scope("/api/v1/internal")
            .wrap(InternalApiKeyMiddleware::new(internal_api_key))
            .service(handlers::auth::google_provider_login)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "player_account_service",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use crate::config::INTERNAL_API_KEY_HEADER;
    use crate::repositories::Stores;
    use crate::services::Services;

    macro_rules! init_app {
        () => {{
            let services = Services::new(Stores::in_memory());
            test::init_service(
                App::new()
                    .configure(|cfg| services.configure(cfg))
                    .configure(|cfg| configure_all_routes(cfg, "gateway-key")),
            )
            .await
        }};
    }

    fn login() -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/v1/internal/auth/google")
            .set_json(json!({ "name": "A", "email": "a@x.com", "google_id": "g1" }))
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = init_app!();
        let req = test::TestRequest::get().uri("/health").to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_internal_scope_requires_key() {
        let app = init_app!();

        let resp = test::call_service(&app, login().to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = login().insert_header((INTERNAL_API_KEY_HEADER, "gateway-key")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_provider_player_gets_main_modality() {
        let app = init_app!();

        let req = login().insert_header((INTERNAL_API_KEY_HEADER, "gateway-key")).to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let player_id = body["player"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/players/{}/modalities", player_id))
            .set_json(json!({ "modality_id": "football" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let link: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(link["is_main"], true);
        assert_eq!(link["player_id"], player_id.as_str());
    }
}
