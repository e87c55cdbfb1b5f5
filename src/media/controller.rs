use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::{
    app::models::{
        api_error::ApiError, api_response::ApiResponse, json_from_request::JsonFromRequest,
    },
    AppState,
};

use super::{
    dtos::submit_task_dto::SubmitTaskDto,
    models::{
        task_snapshot::TaskSnapshot,
        upload_data::{SubmitTaskData, UploadData},
    },
    service,
};

pub async fn upload_image(multipart: Multipart) -> Result<Json<ApiResponse<UploadData>>, ApiError> {
    match service::upload_image(multipart).await {
        Ok(data) => Ok(ApiResponse::success(data)),
        Err(e) => Err(e),
    }
}

pub async fn submit_task(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<SubmitTaskDto>,
) -> Result<Json<ApiResponse<SubmitTaskData>>, ApiError> {
    match service::submit_task(&dto, &state.jimeng).await {
        Ok(data) => Ok(ApiResponse::success(data)),
        Err(e) => {
            tracing::error!(code = %e.code, message = %e.message, "submit failed");
            Err(e)
        }
    }
}

pub async fn get_task_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<ApiResponse<TaskSnapshot>>, ApiError> {
    match service::get_task_status(&task_id, &state.jimeng).await {
        Ok(snapshot) => Ok(ApiResponse::success(snapshot)),
        Err(e) => {
            tracing::error!(%task_id, code = %e.code, message = %e.message, "status query failed");
            Err(e)
        }
    }
}

pub async fn process_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<TaskSnapshot>>, ApiError> {
    match service::process_image(multipart, &state.jimeng, &state.poll_config).await {
        Ok(snapshot) => Ok(ApiResponse::success(snapshot)),
        Err(e) => {
            tracing::error!(code = %e.code, message = %e.message, "process failed");
            Err(e)
        }
    }
}
