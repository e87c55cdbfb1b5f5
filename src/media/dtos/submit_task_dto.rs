use serde::Deserialize;
use validator::Validate;

use crate::media::enums::style_type::StyleType;

pub const DEFAULT_STRENGTH: f64 = 0.7;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitTaskDto {
    #[validate(length(min = 1, message = "file_id is required."))]
    pub file_id: String,
    pub style: StyleType,
    #[validate(length(max = 1000, message = "prompt must be at most 1000 characters."))]
    pub prompt: Option<String>,
    #[validate(range(min = 0.0, max = 1.0, message = "strength must be between 0 and 1."))]
    pub strength: Option<f64>,
}

impl SubmitTaskDto {
    pub fn strength(&self) -> f64 {
        self.strength.unwrap_or(DEFAULT_STRENGTH)
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or("")
    }
}
