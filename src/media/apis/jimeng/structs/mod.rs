pub mod jimeng_get_result_response;
pub mod jimeng_response;
pub mod jimeng_submit_task_response;
