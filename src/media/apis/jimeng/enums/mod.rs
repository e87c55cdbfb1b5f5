pub mod jimeng_task_status;
