pub mod submit_task_dto;
