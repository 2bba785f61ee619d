//! # Application Error Handling System
//!
//! 플레이어 계정 서비스의 통합 에러 처리 시스템입니다.
//! 비즈니스 규칙 위반, 식별자 충돌, 저장소 장애를 서로 다른 변형으로 분류하여
//! 호출자가 각각 다른 복구 경로를 선택할 수 있도록 합니다.
//!
//! ## 에러 분류
//!
//! | 분류 | AppError | HTTP Status |
//! |------|----------|-------------|
//! | 대상 엔티티 없음 | `NotFound` | 404 Not Found |
//! | 비즈니스 규칙 위반 (중복 연결, 한도 초과) | `BusinessRuleError` | 422 Unprocessable Entity |
//! | 식별자 충돌 (다른 프로바이더가 점유한 이메일) | `ConflictError` | 409 Conflict |
//! | 저장소 장애 | `DatabaseError` | 500 Internal Server Error |
//! | 캐시 장애 | `RedisError` | 500 Internal Server Error |
//! | 입력값 검증 실패 | `ValidationError` | 400 Bad Request |
//! | 내부 호출자 인증 실패 | `AuthenticationError` | 401 Unauthorized |
//! | 예상치 못한 오류 | `InternalError` | 500 Internal Server Error |
//!
//! ## 저장소 에러
//!
//! 저장소 구현체는 [`StoreError`]를 반환합니다. 유니크 제약 위반은
//! [`Constraint`]로 어떤 제약이 깨졌는지 알려주며, 서비스 계층은 이를
//! 해당 비즈니스 에러로 번역합니다. 번역되지 않은 저장소 에러는
//! `From<StoreError>` 구현을 통해 그대로 전파됩니다.
//!
//! ```rust,ignore
//! let link = self.link_store
//!     .create(player_id, modality_id)
//!     .await
//!     .map_err(|e| match e {
//!         StoreError::UniqueViolation(Constraint::PlayerModality) => {
//!             AppError::BusinessRuleError("Modality already linked.".to_string())
//!         }
//!         other => other.into(),
//!     })?;
//! ```

use std::fmt;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 저장소 장애 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 참조한 엔티티가 존재하지 않음 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 비즈니스 규칙 위반 (422 Unprocessable Entity)
    #[error("Business rule violation: {0}")]
    BusinessRuleError(String),

    /// 자동으로 해소할 수 없는 식별자 충돌 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BusinessRuleError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 저장소가 보장하는 유니크 제약 조건
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// (player_id, modality_id) 쌍은 한 번만 연결 가능
    PlayerModality,
    /// 플레이어당 메인 모달리티는 하나
    MainModality,
    /// 이메일은 전체 플레이어에서 유일
    PlayerEmail,
    /// 프로바이더 ID는 전체 플레이어에서 유일
    PlayerProviderId,
    /// 한 번 연결된 프로바이더 ID는 다른 값으로 바뀌지 않음
    ProviderAlreadyAttached,
    /// 플랜 한도를 넘는 연결은 생성되지 않음
    ModalityQuota,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Constraint::PlayerModality => "player_modality_unique",
            Constraint::MainModality => "main_modality_unique",
            Constraint::PlayerEmail => "email_unique",
            Constraint::PlayerProviderId => "google_id_unique",
            Constraint::ProviderAlreadyAttached => "google_id_attached",
            Constraint::ModalityQuota => "modality_quota",
        };
        f.write_str(name)
    }
}

/// 저장소 구현체가 반환하는 에러
///
/// 조회 결과 없음은 에러가 아니라 `Ok(None)`으로 표현됩니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// 동시 쓰기 등으로 유니크 제약이 위반됨
    #[error("unique constraint violated: {0}")]
    UniqueViolation(Constraint),

    /// 그 밖의 모든 저장소 장애
    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(constraint) => {
                AppError::ConflictError(format!("unique constraint violated: {}", constraint))
            }
            StoreError::Backend(msg) => AppError::DatabaseError(msg),
        }
    }
}

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
