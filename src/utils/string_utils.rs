//! # 문자열 유틸리티
//!
//! 입력 문자열 정리와 검증에 쓰이는 공통 함수들입니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 필수 문자열 검증
///
/// 앞뒤 공백을 제거한 뒤 비어 있으면 `ValidationError`를 반환합니다.
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 정리
///
/// 공백만 있는 문자열은 값이 없는 것으로 취급합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 이메일 정규화 (공백 제거 + 소문자)
///
/// 유일성 검사와 조회가 같은 형태의 이메일을 보도록 저장 전에 항상 거칩니다.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    validate_required_string(email, "이메일").map(|e| e.to_lowercase())
}

/// serde 역직렬화 시 [`clean_optional_string`]을 적용합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
