use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum MediaApiError {
    NoImageProvided,
    UnsupportedImageType,
    ImageTooLarge,
    InvalidImage,
    InvalidStrength,
    StyleRequired,
}

impl MediaApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::NoImageProvided => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Please choose an image to upload.".to_string(),
            },
            Self::UnsupportedImageType => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Only JPG, PNG, WebP and GIF images are supported.".to_string(),
            },
            Self::ImageTooLarge => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Image must not exceed 10MB.".to_string(),
            },
            Self::InvalidImage => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "The uploaded file is not a valid image.".to_string(),
            },
            Self::InvalidStrength => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "strength must be between 0 and 1.".to_string(),
            },
            Self::StyleRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Please choose a style.".to_string(),
            },
        }
    }
}
