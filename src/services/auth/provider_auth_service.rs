//! # 프로바이더 로그인 식별 서비스
//!
//! 외부 프로바이더(Google) 로그인이 기존 플레이어인지, 이메일로 찾은 플레이어에
//! 프로바이더를 연결해야 하는지, 새 플레이어인지를 결정합니다.
//! OAuth 핸드셰이크는 호출자가 이미 끝냈다고 가정하며, 이 서비스는 프로바이더가
//! 확인한 프로필만 받습니다.
//!
//! ## 결정 흐름
//!
//! ```text
//! find_by_provider_id ── 있음 ──▶ LinkedByProvider      → 그대로 반환 (쓰기 없음)
//!        │ 없음
//!        ▼
//! find_by_email ──────── 있음 ──▶ UnlinkedByEmail       → attach_provider_account
//!        │                        AlreadyLinkedByEmail  → attach_provider_account (아바타만 갱신)
//!        │                        ClaimedByEmail        → ConflictError("Email not available.")
//!        │ 없음
//!        ▼
//!     Unknown ──────────────────▶ create (비밀번호 없음)
//! ```
//!
//! 프로바이더 ID 일치가 항상 이메일 일치보다 우선합니다. 이미 연결된 계정은
//! 요청의 이메일이나 이름이 달라도 그대로 반환되며, 프로필 변경을 반영하지 않습니다.
//! 모든 반환값은 비밀번호 필드가 없는 [`PlayerResponse`]입니다.
//!
//! 조회와 연결 사이에 다른 요청이 같은 계정에 다른 프로바이더를 먼저 연결하면
//! 저장소가 쓰기를 거부하고(`ProviderAlreadyAttached`), 이 경우도
//! `ConflictError("Email not available.")`로 응답합니다. 연결된 프로바이더 ID는
//! 덮어써지지 않습니다.

use std::sync::Arc;
use crate::{
    core::errors::{AppError, AppResult, Constraint, StoreError},
    domain::{
        dto::players::{PlayerResponse, ProviderAuthRequest},
        entities::players::NewPlayer,
        models::IdentityMatch,
    },
    repositories::players::PlayerStore,
    utils::string_utils::{clean_optional_string, normalize_email, validate_required_string},
};

pub const EMAIL_NOT_AVAILABLE: &str = "Email not available.";
pub const PROVIDER_ALREADY_LINKED: &str = "Provider account already linked.";

pub struct ProviderAuthService {
    player_store: Arc<dyn PlayerStore>,
}

impl ProviderAuthService {
    pub fn new(player_store: Arc<dyn PlayerStore>) -> Self {
        Self { player_store }
    }

    /// 프로바이더 로그인을 플레이어 계정으로 해석합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(PlayerResponse)` - 기존, 연결된, 또는 새로 만든 플레이어
    /// * `Err(AppError::ValidationError)` - 이메일 또는 프로바이더 ID가 비어 있음
    /// * `Err(AppError::ConflictError)` - 이메일이 다른 프로바이더 계정에 연결되어 있음
    /// * `Err(AppError::DatabaseError)` - 저장소 장애
    pub async fn authenticate_with_provider(&self, request: ProviderAuthRequest) -> AppResult<PlayerResponse> {
        let email = normalize_email(&request.email)?;
        let provider_id = validate_required_string(&request.google_id, "프로바이더 ID")?;
        let avatar_url = clean_optional_string(request.avatar_url);

        let player = match self.resolve_identity(&email, &provider_id).await? {
            IdentityMatch::LinkedByProvider(player) => {
                log::info!("프로바이더 로그인: player={}", player.id);
                player
            }
            IdentityMatch::AlreadyLinkedByEmail(player) => {
                log::debug!("이메일로 찾은 플레이어에 같은 프로바이더가 이미 연결됨: player={}", player.id);
                self.player_store
                    .attach_provider_account(&player.id, &provider_id, avatar_url.as_deref())
                    .await
                    .map_err(translate_player_error)?
            }
            IdentityMatch::ClaimedByEmail(player) => {
                log::warn!("다른 프로바이더 계정이 점유한 이메일: player={} email={}", player.id, email);
                return Err(AppError::ConflictError(EMAIL_NOT_AVAILABLE.to_string()));
            }
            IdentityMatch::UnlinkedByEmail(player) => {
                let updated = self.player_store
                    .attach_provider_account(&player.id, &provider_id, avatar_url.as_deref())
                    .await
                    .map_err(translate_player_error)?;
                log::info!("기존 계정에 프로바이더 연결: player={} email={}", updated.id, email);
                updated
            }
            IdentityMatch::Unknown => {
                let new_player = NewPlayer::from_provider(
                    request.name.trim().to_string(),
                    email.clone(),
                    provider_id,
                    avatar_url,
                    request.is_email_verified,
                );
                let created = self.player_store
                    .create(new_player)
                    .await
                    .map_err(translate_player_error)?;
                log::info!("새 프로바이더 플레이어 등록: player={} email={}", created.id, email);
                created
            }
        };

        Ok(PlayerResponse::from(player))
    }

    /// 프로바이더 ID → 이메일 순서로 플레이어를 찾아 분류합니다.
    ///
    /// 이메일 조회는 프로바이더 ID 조회가 실패했을 때만 수행됩니다.
    pub async fn resolve_identity(&self, email: &str, provider_id: &str) -> AppResult<IdentityMatch> {
        if let Some(player) = self.player_store.find_by_provider_id(provider_id).await? {
            return Ok(IdentityMatch::LinkedByProvider(player));
        }

        match self.player_store.find_by_email(email).await? {
            Some(player) => Ok(IdentityMatch::classify_email_match(player, provider_id)),
            None => Ok(IdentityMatch::Unknown),
        }
    }
}

fn translate_player_error(err: StoreError) -> AppError {
    match err {
        StoreError::UniqueViolation(Constraint::PlayerEmail | Constraint::ProviderAlreadyAttached) => {
            AppError::ConflictError(EMAIL_NOT_AVAILABLE.to_string())
        }
        StoreError::UniqueViolation(Constraint::PlayerProviderId) => {
            AppError::ConflictError(PROVIDER_ALREADY_LINKED.to_string())
        }
        other => other.into(),
    }
}
