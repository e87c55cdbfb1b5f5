use serde::Serialize;

use crate::media::{
    apis::jimeng::enums::jimeng_task_status::JimengTaskStatus, enums::task_status::TaskStatus,
};

/// What is known about a task after one status query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSnapshot {
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TaskSnapshot {
    pub fn new(task_id: &str, status: TaskStatus) -> Self {
        Self {
            task_id: task_id.to_string(),
            status,
            progress: None,
            result_url: None,
            error_message: None,
        }
    }

    pub fn failed(task_id: &str, error_message: &str) -> Self {
        Self {
            error_message: Some(error_message.to_string()),
            ..Self::new(task_id, TaskStatus::Failed)
        }
    }

    /// Maps a vendor status onto the local lifecycle. Unrecognized statuses count as
    /// pending so new vendor states do not end a poll early.
    pub fn from_vendor(task_id: &str, vendor_status: Option<&str>, image_url: Option<&str>) -> Self {
        match vendor_status {
            Some(JimengTaskStatus::IN_QUEUE) => Self::new(task_id, TaskStatus::Pending),
            Some(JimengTaskStatus::GENERATING) => Self::new(task_id, TaskStatus::Processing),
            Some(JimengTaskStatus::DONE) => match image_url {
                Some(url) => Self {
                    result_url: Some(url.to_string()),
                    ..Self::new(task_id, TaskStatus::Success)
                },
                None => Self::failed(task_id, "Task completed without a result image."),
            },
            Some(JimengTaskStatus::NOT_FOUND) => Self::failed(task_id, "Task not found."),
            Some(JimengTaskStatus::EXPIRED) => Self::failed(task_id, "Task expired."),
            _ => Self::new(task_id, TaskStatus::Pending),
        }
    }
}
