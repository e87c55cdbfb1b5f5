pub mod task_snapshot;
pub mod upload_data;
