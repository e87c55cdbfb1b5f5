use crate::app::models::api_error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum JimengError {
    #[error("The request timed out, please retry.")]
    Timeout,
    #[error("Too many requests to the vision API, please retry later.")]
    RateLimited,
    #[error("Vision API authentication failed, check the access key.")]
    AuthFailure,
    #[error("{0}")]
    Vendor(String),
    #[error("No task id was returned by the vision API.")]
    MissingTaskId,
    #[error("Server error: {}", describe_status(.status))]
    Unknown { status: Option<u16> },
    #[error("Failed to encode the request body.")]
    Encode(#[from] serde_json::Error),
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "unknown".to_string(),
    }
}

impl From<JimengError> for ApiError {
    fn from(e: JimengError) -> Self {
        ApiError::internal(e.to_string())
    }
}
