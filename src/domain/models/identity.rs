//! 프로바이더 로그인 식별 결과 모델
//!
//! 외부 프로바이더 로그인이 어떤 플레이어에 해당하는지를 태그된 결과로 표현합니다.
//! 우선순위는 프로바이더 ID 일치 → 이메일 일치 → 신규 생성 순서입니다.

use crate::domain::entities::players::Player;

/// 프로바이더 로그인 식별 결과
#[derive(Debug, Clone, PartialEq)]
pub enum IdentityMatch {
    /// 프로바이더 ID로 이미 연결된 플레이어를 찾음
    LinkedByProvider(Player),
    /// 이메일로 찾았고 아직 프로바이더가 연결되지 않음
    UnlinkedByEmail(Player),
    /// 이메일로 찾았지만 다른 프로바이더 ID가 이미 연결됨
    ClaimedByEmail(Player),
    /// 이메일로 찾았고 같은 프로바이더 ID가 이미 연결됨 (다시 연결하면 아바타만 갱신)
    AlreadyLinkedByEmail(Player),
    /// 일치하는 플레이어 없음
    Unknown,
}

impl IdentityMatch {
    /// 이메일로 찾은 플레이어를 요청된 프로바이더 ID 기준으로 분류합니다.
    pub fn classify_email_match(player: Player, provider_id: &str) -> Self {
        match player.linked_provider_id() {
            None => IdentityMatch::UnlinkedByEmail(player),
            Some(existing) if existing == provider_id => IdentityMatch::AlreadyLinkedByEmail(player),
            Some(_) => IdentityMatch::ClaimedByEmail(player),
        }
    }
}
