use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct JimengSubmitTaskData {
    pub task_id: Option<String>,
}
