use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SubmitTaskInputSpec<'a> {
    pub req_key: &'a str,
    pub binary_data_base64: Vec<&'a str>,
    pub prompt: &'a str,
    pub seed: i64,
    pub scale: f64,
}

#[derive(Debug, Serialize)]
pub struct GetResultInputSpec<'a> {
    pub req_key: &'a str,
    pub task_id: &'a str,
    /// JSON document embedded as a string, as the vendor expects.
    pub req_json: String,
}

#[derive(Debug, Serialize)]
pub struct GetResultReqJson {
    pub return_url: bool,
    pub logo_info: LogoInfo,
}

#[derive(Debug, Serialize)]
pub struct LogoInfo {
    pub add_logo: bool,
}

impl Default for GetResultReqJson {
    fn default() -> Self {
        Self {
            return_url: true,
            logo_info: LogoInfo { add_logo: false },
        }
    }
}
