use crate::media::models::task_snapshot::TaskSnapshot;

use super::{
    client::JimengClient,
    config::{GET_RESULT_ACTION, RANDOM_SEED, REQ_KEY, SUBMIT_TASK_ACTION},
    errors::JimengError,
    models::input_spec::{GetResultInputSpec, GetResultReqJson, SubmitTaskInputSpec},
    structs::{
        jimeng_get_result_response::JimengGetResultData,
        jimeng_submit_task_response::JimengSubmitTaskData,
    },
};

pub async fn submit_task(
    client: &JimengClient,
    image_base64: &str,
    prompt: &str,
    scale: f64,
) -> Result<String, JimengError> {
    let input_spec = SubmitTaskInputSpec {
        req_key: REQ_KEY,
        binary_data_base64: vec![image_base64],
        prompt,
        seed: RANDOM_SEED,
        scale,
    };

    let response = client
        .call::<_, JimengSubmitTaskData>(SUBMIT_TASK_ACTION, &input_spec)
        .await?;

    match response.data.and_then(|data| data.task_id) {
        Some(task_id) if !task_id.is_empty() => {
            tracing::debug!(%task_id, "submitted stylization task");
            Ok(task_id)
        }
        _ => {
            tracing::warn!(request_id = ?response.request_id, "submit response carried no task id");
            Err(JimengError::MissingTaskId)
        }
    }
}

pub async fn get_task_status(
    client: &JimengClient,
    task_id: &str,
) -> Result<TaskSnapshot, JimengError> {
    let input_spec = GetResultInputSpec {
        req_key: REQ_KEY,
        task_id,
        req_json: serde_json::to_string(&GetResultReqJson::default())?,
    };

    let response = client
        .call::<_, JimengGetResultData>(GET_RESULT_ACTION, &input_spec)
        .await?;

    let snapshot = match &response.data {
        Some(data) => TaskSnapshot::from_vendor(task_id, data.status.as_deref(), data.first_image_url()),
        None => TaskSnapshot::from_vendor(task_id, None, None),
    };

    tracing::debug!(
        task_id,
        vendor_status = ?response.data.as_ref().and_then(|data| data.status.as_deref()),
        status = snapshot.status.value(),
        "queried stylization task"
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use super::*;
    use crate::media::{
        apis::jimeng::{signer::Credentials, transport::fake::FakeTransport},
        enums::task_status::TaskStatus,
    };

    fn client(transport: Arc<FakeTransport>) -> JimengClient {
        JimengClient::new(Credentials::new("ak", "sk"), "visual.volcengineapi.com", transport)
    }

    #[tokio::test]
    async fn test_should_submit_task_with_fixed_parameters() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_json(
            200,
            json!({ "code": 10000, "message": "Success", "data": { "task_id": "7392616336519610409" } }),
        );

        let task_id = submit_task(&client(transport.clone()), "aW1hZ2U=", "prompt", 0.7)
            .await
            .unwrap();
        assert_eq!(task_id, "7392616336519610409");

        let request = &transport.requests()[0];
        assert!(request.url.contains("Action=CVSync2AsyncSubmitTask"));
        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            body,
            json!({
                "req_key": "jimeng_i2i_v30",
                "binary_data_base64": ["aW1hZ2U="],
                "prompt": "prompt",
                "seed": -1,
                "scale": 0.7
            })
        );
    }

    #[tokio::test]
    async fn test_should_fail_submission_without_task_id() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_json(200, json!({ "code": 10000, "message": "Success", "data": {} }));

        let result = submit_task(&client(transport), "aW1hZ2U=", "prompt", 0.7).await;
        assert!(matches!(result, Err(JimengError::MissingTaskId)));
    }

    #[tokio::test]
    async fn test_should_query_result_with_url_return_enabled() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_json(
            200,
            json!({
                "code": 10000,
                "message": "Success",
                "data": { "status": "done", "image_urls": ["https://cdn.example.com/out.png"] }
            }),
        );

        let snapshot = get_task_status(&client(transport.clone()), "t-1").await.unwrap();
        assert_eq!(snapshot.status, TaskStatus::Success);
        assert_eq!(snapshot.result_url.as_deref(), Some("https://cdn.example.com/out.png"));

        let request = &transport.requests()[0];
        assert!(request.url.contains("Action=CVSync2AsyncGetResult"));
        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["req_key"], "jimeng_i2i_v30");
        assert_eq!(body["task_id"], "t-1");
        let req_json: Value = serde_json::from_str(body["req_json"].as_str().unwrap()).unwrap();
        assert_eq!(req_json, json!({ "return_url": true, "logo_info": { "add_logo": false } }));
    }

    #[tokio::test]
    async fn test_should_report_expired_task_as_failed() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_json(
            200,
            json!({ "code": 10000, "message": "Success", "data": { "status": "expired" } }),
        );

        let snapshot = get_task_status(&client(transport), "t-2").await.unwrap();
        assert_eq!(snapshot.status, TaskStatus::Failed);
        assert_eq!(snapshot.error_message.as_deref(), Some("Task expired."));
    }
}
