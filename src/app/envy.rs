use std::fmt;

use serde::Deserialize;

use crate::media::apis::jimeng::{config::API_HOST, signer::Credentials};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_JIMENG_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Deserialize)]
pub struct Envy {
    pub app_env: Option<String>,
    pub port: Option<u16>,

    pub volc_access_key_id: String,
    pub volc_secret_access_key: String,

    pub jimeng_api_host: Option<String>,
    pub jimeng_timeout_secs: Option<u64>,
}

impl Envy {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.volc_access_key_id, &self.volc_secret_access_key)
    }

    pub fn jimeng_api_host(&self) -> &str {
        self.jimeng_api_host.as_deref().unwrap_or(API_HOST)
    }

    pub fn jimeng_timeout_secs(&self) -> u64 {
        self.jimeng_timeout_secs
            .unwrap_or(DEFAULT_JIMENG_TIMEOUT_SECS)
    }
}

// Keys never reach the logs, even through `{:?}`.
impl fmt::Debug for Envy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envy")
            .field("app_env", &self.app_env)
            .field("port", &self.port)
            .field("volc_access_key_id", &"<redacted>")
            .field("volc_secret_access_key", &"<redacted>")
            .field("jimeng_api_host", &self.jimeng_api_host)
            .field("jimeng_timeout_secs", &self.jimeng_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envy() -> Envy {
        Envy {
            app_env: Some("test".to_string()),
            port: None,
            volc_access_key_id: "AKLTSECRETID".to_string(),
            volc_secret_access_key: "very-secret".to_string(),
            jimeng_api_host: None,
            jimeng_timeout_secs: None,
        }
    }

    #[test]
    fn test_should_redact_keys_in_debug_output() {
        let printed = format!("{:?}", envy());
        assert!(!printed.contains("AKLTSECRETID"));
        assert!(!printed.contains("very-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_should_fall_back_to_vendor_defaults() {
        let envy = envy();
        assert_eq!(envy.jimeng_api_host(), API_HOST);
        assert_eq!(envy.jimeng_timeout_secs(), DEFAULT_JIMENG_TIMEOUT_SECS);
    }

    #[test]
    fn test_should_deserialize_from_env_pairs() {
        let vars = vec![
            ("VOLC_ACCESS_KEY_ID".to_string(), "ak".to_string()),
            ("VOLC_SECRET_ACCESS_KEY".to_string(), "sk".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let envy: Envy = envy::from_iter(vars).unwrap();
        assert_eq!(envy.port, Some(8080));
        assert_eq!(envy.volc_access_key_id, "ak");
        assert!(envy.jimeng_api_host.is_none());
    }
}
