//! Players Entity Module
//!
//! 플레이어 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 주요 구성 요소
//!
//! - [`Player`](player::Player): 플레이어 계정 레코드
//! - [`NewPlayer`](player::NewPlayer): 생성 시 저장소에 넘기는 필드
//! - [`SubscriptionPlan`](player::SubscriptionPlan) / [`ModalityQuota`](player::ModalityQuota):
//!   플랜별 모달리티 연결 한도 (무료 2개, 유료 무제한)

pub mod player;

pub use player::*;
