use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::dto::players::request::validate_not_blank;

/// 모달리티 연결 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddModalityRequest {
    #[validate(length(min = 1, max = 64, message = "모달리티 ID는 1-64자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub modality_id: String,
}
