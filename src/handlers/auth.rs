//! # Provider Authentication Handlers
//!
//! 게이트웨이가 OAuth 핸드셰이크를 마친 뒤 프로바이더가 확인한 프로필을 전달하는
//! 내부 엔드포인트입니다. 라우트 설정에서 `InternalApiKeyMiddleware`로 보호됩니다.

use actix_web::{web, HttpResponse, post};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::players::{ProviderAuthRequest, ProviderAuthResponse};
use crate::services::auth::ProviderAuthService;

/// Google 프로바이더 로그인 핸들러
///
/// # Endpoint
/// `POST /internal/auth/google`
///
/// # 요청 본문
///
/// ```json
/// {
///   "name": "A",
///   "email": "a@x.com",
///   "google_id": "1234567890",
///   "avatar_url": "https://lh3.googleusercontent.com/a/photo.png",
///   "is_email_verified": true
/// }
/// ```
///
/// # 응답
///
/// - `200 OK` - `{ "player": { ... } }` (기존, 연결된, 또는 새 플레이어)
/// - `400 Bad Request` - 입력 검증 실패
/// - `409 Conflict` - 이메일이 다른 프로바이더 계정에 연결되어 있음
#[post("/auth/google")]
pub async fn google_provider_login(
    payload: web::Json<ProviderAuthRequest>,
    service: web::Data<ProviderAuthService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    log::info!("프로바이더 로그인 요청 - 이메일: {}", payload.email);

    let player = service.authenticate_with_provider(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ProviderAuthResponse { player }))
}
