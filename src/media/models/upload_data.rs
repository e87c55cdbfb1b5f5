use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct UploadData {
    /// Base64 of the image itself; nothing is stored server-side.
    pub file_id: String,
    pub file_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitTaskData {
    pub task_id: String,
}
