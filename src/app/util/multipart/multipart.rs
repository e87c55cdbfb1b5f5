use std::collections::HashMap;

use axum::extract::Multipart;
use uuid::Uuid;

use crate::app::models::api_error::ApiError;

use super::models::file_properties::FileProperties;

/// Parts of a multipart form: file fields in arrival order and plain text fields by name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub files: Vec<FileProperties>,
    pub fields: HashMap<String, String>,
}

impl MultipartForm {
    pub fn take_file(&mut self, field_name: &str) -> Option<FileProperties> {
        let index = self
            .files
            .iter()
            .position(|file| file.field_name == field_name)?;

        Some(self.files.remove(index))
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

pub async fn read_multipart(mut multipart: Multipart) -> Result<MultipartForm, ApiError> {
    let mut form = MultipartForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(%e, "failed to read multipart field");
                return Err(ApiError::bad_request("Failed to read the uploaded form."));
            }
        };

        let field_name = field.name().unwrap_or("file").to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            match field.text().await {
                Ok(text) => {
                    form.fields.insert(field_name, text);
                }
                Err(e) => {
                    tracing::warn!(%e, "failed to read multipart text field");
                    return Err(ApiError::bad_request("Failed to read the uploaded form."));
                }
            }
            continue;
        };

        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(%e, "failed to read multipart file field");
                return Err(ApiError::bad_request("Failed to read the uploaded file."));
            }
        };

        form.files.push(FileProperties {
            id: Uuid::new_v4().to_string(),
            field_name,
            file_name,
            mime_type,
            data,
        });
    }

    Ok(form)
}
