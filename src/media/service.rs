use axum::extract::Multipart;
use mime::Mime;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::app::{
    models::api_error::ApiError,
    util::multipart::{
        models::{file_properties::FileProperties, image_file_properties::ImageFileProperties},
        multipart::{read_multipart, MultipartForm},
    },
};

use super::{
    apis::jimeng::{self, client::JimengClient},
    dtos::submit_task_dto::SubmitTaskDto,
    enums::style_type::StyleType,
    errors::MediaApiError,
    models::{
        task_snapshot::TaskSnapshot,
        upload_data::{SubmitTaskData, UploadData},
    },
    poller::{self, PollConfig},
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;
pub const IMAGE_FIELD: &str = "file";
pub const PROMPT_DELIMITER: &str = "，";

const ALLOWED_IMAGE_SUBTYPES: [&str; 4] = ["jpeg", "png", "webp", "gif"];

/// The preset's base prompt, followed by the user's text when there is any.
pub fn build_prompt(user_prompt: &str, style: StyleType) -> String {
    let base_prompt = style.base_prompt();

    if user_prompt.trim().is_empty() {
        return base_prompt.to_string();
    }

    format!("{}{}{}", base_prompt, PROMPT_DELIMITER, user_prompt)
}

pub async fn upload_image(multipart: Multipart) -> Result<UploadData, ApiError> {
    let mut form = read_multipart(multipart).await?;
    let image = take_image(&mut form)?;

    tracing::debug!(
        id = %image.file_properties.id,
        mime_type = %image.file_properties.mime_type,
        width = image.image_size.width,
        height = image.image_size.height,
        "buffered upload"
    );

    Ok(UploadData {
        file_id: base64::encode(&image.file_properties.data),
        file_url: String::new(),
    })
}

pub async fn submit_task(dto: &SubmitTaskDto, client: &JimengClient) -> Result<SubmitTaskData, ApiError> {
    if let Err(e) = dto.validate() {
        return Err(ApiError::bad_request(e.to_string()));
    }

    let prompt = build_prompt(dto.prompt(), dto.style);

    tracing::debug!(style = %dto.style, strength = dto.strength(), "submitting stylization task");

    let task_id = jimeng::service::submit_task(client, &dto.file_id, &prompt, dto.strength()).await?;

    Ok(SubmitTaskData { task_id })
}

pub async fn get_task_status(task_id: &str, client: &JimengClient) -> Result<TaskSnapshot, ApiError> {
    if task_id.trim().is_empty() {
        return Err(ApiError::bad_request("task_id is required."));
    }

    Ok(jimeng::service::get_task_status(client, task_id).await?)
}

/// Upload, submit and poll in one request. Dropping the returned future (for instance when
/// the caller disconnects) abandons the poll.
pub async fn process_image(
    multipart: Multipart,
    client: &JimengClient,
    config: &PollConfig,
) -> Result<TaskSnapshot, ApiError> {
    let mut form = read_multipart(multipart).await?;
    let image = take_image(&mut form)?;
    let dto = process_dto_from_form(&form, base64::encode(&image.file_properties.data))?;

    let submitted = submit_task(&dto, client).await?;

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let snapshot = poller::await_task_completion(client, &submitted.task_id, config, &cancel, |snapshot| {
        tracing::debug!(
            task_id = %snapshot.task_id,
            status = snapshot.status.value(),
            progress = ?snapshot.progress,
            "process update"
        );
    })
    .await?;

    Ok(snapshot)
}

fn process_dto_from_form(form: &MultipartForm, file_id: String) -> Result<SubmitTaskDto, ApiError> {
    let style = match form.field("style").map(str::trim) {
        Some(style) if !style.is_empty() => style.parse::<StyleType>().map_err(ApiError::bad_request)?,
        _ => return Err(MediaApiError::StyleRequired.value()),
    };

    let strength = match form.field("strength").map(str::trim) {
        Some(strength) if !strength.is_empty() => match strength.parse::<f64>() {
            Ok(strength) => Some(strength),
            Err(_) => return Err(MediaApiError::InvalidStrength.value()),
        },
        _ => None,
    };

    Ok(SubmitTaskDto {
        file_id,
        style,
        prompt: form.field("prompt").map(str::to_string),
        strength,
    })
}

fn take_image(form: &mut MultipartForm) -> Result<ImageFileProperties, ApiError> {
    let Some(file) = form.take_file(IMAGE_FIELD) else {
        return Err(MediaApiError::NoImageProvided.value());
    };

    validate_image(file)
}

fn validate_image(file: FileProperties) -> Result<ImageFileProperties, ApiError> {
    if !is_allowed_mime_type(&file.mime_type) {
        return Err(MediaApiError::UnsupportedImageType.value());
    }

    if file.data.len() > MAX_IMAGE_SIZE {
        return Err(MediaApiError::ImageTooLarge.value());
    }

    match ImageFileProperties::from_file_properties(file) {
        Ok(image) => Ok(image),
        Err(file) => {
            tracing::debug!(id = %file.id, file_name = %file.file_name, "upload is not a readable image");
            Err(MediaApiError::InvalidImage.value())
        }
    }
}

fn is_allowed_mime_type(mime_type: &str) -> bool {
    let Ok(mime) = mime_type.parse::<Mime>() else {
        return false;
    };

    mime.type_() == mime::IMAGE && ALLOWED_IMAGE_SUBTYPES.contains(&mime.subtype().as_str())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;
    use serde_json::{json, Value};

    use super::*;
    use crate::media::{
        apis::jimeng::{signer::Credentials, transport::fake::FakeTransport},
        enums::task_status::TaskStatus,
    };

    fn client(transport: Arc<FakeTransport>) -> JimengClient {
        JimengClient::new(Credentials::new("ak", "sk"), "visual.volcengineapi.com", transport)
    }

    fn file(mime_type: &str, data: Vec<u8>) -> FileProperties {
        FileProperties {
            id: "id".to_string(),
            field_name: IMAGE_FIELD.to_string(),
            file_name: "photo".to_string(),
            mime_type: mime_type.to_string(),
            data: Bytes::from(data),
        }
    }

    /// Signature plus IHDR chunk of a 2x3 PNG, enough for a header read.
    fn png_header() -> Vec<u8> {
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&[0, 0, 0, 13]);
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&2u32.to_be_bytes());
        data.extend_from_slice(&3u32.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        data.extend_from_slice(&[0, 0, 0, 0]);
        data
    }

    fn result(status: &str, urls: Value) -> Value {
        json!({ "code": 10000, "message": "Success", "data": { "status": status, "image_urls": urls } })
    }

    #[test]
    fn test_should_use_base_prompt_when_user_prompt_is_blank() {
        assert_eq!(build_prompt("", StyleType::Anime), StyleType::Anime.base_prompt());
        assert_eq!(build_prompt("   ", StyleType::Anime), StyleType::Anime.base_prompt());
    }

    #[test]
    fn test_should_append_user_prompt_after_delimiter() {
        assert_eq!(
            build_prompt("warm tones", StyleType::Anime),
            format!("{}，warm tones", StyleType::Anime.base_prompt())
        );
    }

    #[test]
    fn test_should_accept_supported_image() {
        let image = validate_image(file("image/png", png_header())).unwrap();
        assert_eq!(image.image_size.width, 2);
        assert_eq!(image.image_size.height, 3);
    }

    #[test]
    fn test_should_reject_unsupported_mime_type() {
        let e = validate_image(file("image/bmp", png_header())).unwrap_err();
        assert_eq!(e, MediaApiError::UnsupportedImageType.value());
    }

    #[test]
    fn test_should_only_allow_listed_image_types() {
        assert!(is_allowed_mime_type("image/jpeg"));
        assert!(is_allowed_mime_type("image/webp"));
        assert!(is_allowed_mime_type("image/gif"));
        assert!(!is_allowed_mime_type("image/svg+xml"));
        assert!(!is_allowed_mime_type("application/octet-stream"));
        assert!(!is_allowed_mime_type("not a mime"));
    }

    #[test]
    fn test_should_reject_oversized_image() {
        let mut data = png_header();
        data.resize(MAX_IMAGE_SIZE + 1, 0);
        let e = validate_image(file("image/png", data)).unwrap_err();
        assert_eq!(e, MediaApiError::ImageTooLarge.value());
    }

    #[test]
    fn test_should_reject_bytes_that_are_not_an_image() {
        let e = validate_image(file("image/jpeg", b"not an image".to_vec())).unwrap_err();
        assert_eq!(e, MediaApiError::InvalidImage.value());
    }

    #[test]
    fn test_should_read_process_fields_from_form() {
        let mut form = MultipartForm::default();
        form.fields.insert("style".to_string(), "ghibli".to_string());
        form.fields.insert("strength".to_string(), "0.4".to_string());
        let dto = process_dto_from_form(&form, "aW1n".to_string()).unwrap();
        assert_eq!(dto.style, StyleType::Ghibli);
        assert_eq!(dto.strength(), 0.4);

        form.fields.insert("strength".to_string(), "strong".to_string());
        assert_eq!(
            process_dto_from_form(&form, "aW1n".to_string()).unwrap_err(),
            MediaApiError::InvalidStrength.value()
        );

        form.fields.remove("style");
        assert_eq!(
            process_dto_from_form(&form, "aW1n".to_string()).unwrap_err(),
            MediaApiError::StyleRequired.value()
        );
    }

    #[tokio::test]
    async fn test_should_reject_invalid_dto_before_calling_vendor() {
        let transport = Arc::new(FakeTransport::new());
        let dto = SubmitTaskDto {
            file_id: "aW1n".to_string(),
            style: StyleType::Anime,
            prompt: None,
            strength: Some(-0.1),
        };

        let e = submit_task(&dto, &client(transport.clone())).await.unwrap_err();
        assert_eq!(e.code, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_should_run_sketch_task_from_submission_to_success() {
        let transport = Arc::new(FakeTransport::new());
        transport
            .push_json(200, json!({ "code": 10000, "message": "Success", "data": { "task_id": "t-42" } }))
            .push_json(200, result("in_queue", json!([])))
            .push_json(200, result("generating", json!([])))
            .push_json(200, result("done", json!(["https://cdn.example.com/sketch.png"])));
        let client = client(transport.clone());

        let dto = SubmitTaskDto {
            file_id: "aW1n".to_string(),
            style: StyleType::Sketch,
            prompt: None,
            strength: None,
        };
        let submitted = submit_task(&dto, &client).await.unwrap();
        assert_eq!(submitted.task_id, "t-42");

        let body: Value = serde_json::from_str(&transport.requests()[0].body).unwrap();
        assert_eq!(body["prompt"], StyleType::Sketch.base_prompt());
        assert_eq!(body["scale"], 0.7);

        let mut seen = Vec::new();
        let snapshot = poller::await_task_completion(
            &client,
            &submitted.task_id,
            &PollConfig::default(),
            &CancellationToken::new(),
            |snapshot| seen.push(snapshot.status),
        )
        .await
        .unwrap();

        assert_eq!(
            seen,
            vec![TaskStatus::Pending, TaskStatus::Processing, TaskStatus::Success]
        );
        assert_eq!(snapshot.result_url.as_deref(), Some("https://cdn.example.com/sketch.png"));
        assert_eq!(transport.request_count(), 4);
    }
}
