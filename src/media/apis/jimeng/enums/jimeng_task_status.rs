#[non_exhaustive]
pub struct JimengTaskStatus;

impl JimengTaskStatus {
    pub const IN_QUEUE: &str = "in_queue";
    pub const GENERATING: &str = "generating";
    pub const DONE: &str = "done";
    pub const NOT_FOUND: &str = "not_found";
    pub const EXPIRED: &str = "expired";
}
