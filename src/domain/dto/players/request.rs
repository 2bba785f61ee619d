//! 프로바이더 로그인 요청 DTO
//!
//! OAuth 핸드셰이크를 마친 게이트웨이가 프로바이더에서 확인한 프로필을 전달합니다.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProviderAuthRequest {
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    pub name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, max = 255, message = "프로바이더 ID는 1-255자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub google_id: String,

    #[validate(url(message = "유효한 URL을 입력해주세요"))]
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub is_email_verified: bool,
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message("공백만으로 이루어질 수 없습니다".into()));
    }
    Ok(())
}
