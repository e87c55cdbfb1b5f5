use axum::Json;
use serde::Serialize;

pub const SUCCESS_CODE: u16 = 0;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            code: SUCCESS_CODE,
            message: "success".to_string(),
            data,
        })
    }
}
