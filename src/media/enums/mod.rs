pub mod style_type;
pub mod task_status;
