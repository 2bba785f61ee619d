//! Player Entity Implementation
//!
//! 플레이어 엔티티와 구독 플랜, 플랜별 모달리티 한도를 정의합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 무료 플랜에서 연결할 수 있는 최대 모달리티 수
pub const FREE_PLAN_MODALITY_LIMIT: u64 = 2;

/// 구독 플랜
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    #[default]
    Free,
    Pro,
    Premium,
}

impl SubscriptionPlan {
    /// 플랜에 따른 모달리티 연결 한도
    pub fn modality_quota(&self) -> ModalityQuota {
        match self {
            SubscriptionPlan::Free => ModalityQuota::Limited(FREE_PLAN_MODALITY_LIMIT),
            SubscriptionPlan::Pro | SubscriptionPlan::Premium => ModalityQuota::Unlimited,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::Pro => "pro",
            SubscriptionPlan::Premium => "premium",
        }
    }
}

/// 모달리티 연결 한도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalityQuota {
    Limited(u64),
    Unlimited,
}

impl ModalityQuota {
    /// 현재 `existing`개가 연결된 상태에서 하나 더 연결할 수 있는지 확인
    pub fn allows_another(&self, existing: u64) -> bool {
        match self {
            ModalityQuota::Limited(max) => existing < *max,
            ModalityQuota::Unlimited => true,
        }
    }
}

/// 플레이어 엔티티
///
/// `password_hash`는 저장소 내부에서만 다뤄지며, 외부로 나가는 응답은
/// 항상 [`PlayerResponse`](crate::domain::dto::players::response::PlayerResponse)로 변환됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// 플레이어 이메일 (unique)
    pub email: String,
    #[serde(default)]
    pub subscription_plan: SubscriptionPlan,
    /// Google 계정 ID (unique when present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_email_verified: bool,
    /// 해시된 비밀번호 (프로바이더로만 가입한 플레이어는 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// 비어 있지 않은 프로바이더 ID
    pub fn linked_provider_id(&self) -> Option<&str> {
        self.google_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

/// 플레이어 생성 시 저장소에 전달하는 필드
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub email: String,
    pub google_id: Option<String>,
    pub avatar_url: Option<String>,
    pub is_email_verified: bool,
    pub subscription_plan: SubscriptionPlan,
}

impl NewPlayer {
    /// 프로바이더 로그인으로 처음 가입하는 플레이어 (비밀번호 없음, 무료 플랜)
    pub fn from_provider(
        name: String,
        email: String,
        google_id: String,
        avatar_url: Option<String>,
        is_email_verified: bool,
    ) -> Self {
        Self {
            name,
            email,
            google_id: Some(google_id),
            avatar_url,
            is_email_verified,
            subscription_plan: SubscriptionPlan::Free,
        }
    }

    /// 저장소가 할당한 ID로 엔티티를 만듭니다.
    pub fn into_player(self, id: String) -> Player {
        let now = Utc::now();

        Player {
            id,
            name: self.name,
            email: self.email,
            subscription_plan: self.subscription_plan,
            google_id: self.google_id,
            avatar_url: self.avatar_url,
            is_email_verified: self.is_email_verified,
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }
}
