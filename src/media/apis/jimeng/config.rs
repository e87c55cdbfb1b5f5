pub static API_HOST: &str = "visual.volcengineapi.com";
pub static API_PATH: &str = "/";
pub static API_VERSION: &str = "2022-08-31";

pub static REGION: &str = "cn-north-1";
pub static SERVICE: &str = "cv";

pub static SUBMIT_TASK_ACTION: &str = "CVSync2AsyncSubmitTask";
pub static GET_RESULT_ACTION: &str = "CVSync2AsyncGetResult";

/// Image-to-image 3.0 model.
pub static REQ_KEY: &str = "jimeng_i2i_v30";

/// Business code the vendor returns for a successful call.
pub const SUCCESS_CODE: i64 = 10000;

/// Asks the vendor to pick a random seed.
pub const RANDOM_SEED: i64 = -1;
