use serde::Deserialize;

use crate::media::apis::jimeng::config::SUCCESS_CODE;

/// Envelope shared by every vision API action.
#[derive(Debug, Deserialize)]
pub struct JimengResponse<T> {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub request_id: Option<String>,
    pub data: Option<T>,
    #[serde(rename = "ResponseMetadata")]
    pub response_metadata: Option<JimengResponseMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct JimengResponseMetadata {
    #[serde(rename = "Error")]
    pub error: Option<JimengResponseError>,
}

#[derive(Debug, Deserialize)]
pub struct JimengResponseError {
    #[serde(rename = "Code")]
    pub code: Option<String>,
    #[serde(rename = "Message")]
    pub message: Option<String>,
}

impl<T> JimengResponse<T> {
    /// A message the vendor actually wrote: the metadata error message, or the envelope
    /// message next to a non-success business code.
    pub fn vendor_message(&self) -> Option<String> {
        if let Some(message) = self
            .response_metadata
            .as_ref()
            .and_then(|metadata| metadata.error.as_ref())
            .and_then(|error| error.message.as_ref())
        {
            return Some(message.to_string());
        }

        match (&self.message, self.code) {
            (Some(_), Some(SUCCESS_CODE)) => None,
            (Some(message), _) => Some(message.to_string()),
            (None, _) => None,
        }
    }

    /// The vendor's complaint about this call, if any. The metadata error wins over the
    /// business code, matching the order the vendor documents.
    pub fn error_message(&self) -> Option<String> {
        if let Some(error) = self
            .response_metadata
            .as_ref()
            .and_then(|metadata| metadata.error.as_ref())
        {
            return Some(match (&error.message, &error.code) {
                (Some(message), _) => message.to_string(),
                (None, Some(code)) => code.to_string(),
                (None, None) => "The vision API rejected the request.".to_string(),
            });
        }

        match self.code {
            Some(SUCCESS_CODE) => None,
            Some(code) => Some(
                self.message
                    .clone()
                    .unwrap_or_else(|| format!("The vision API returned code {}.", code)),
            ),
            None => Some(
                self.message
                    .clone()
                    .unwrap_or_else(|| "The vision API returned no status code.".to_string()),
            ),
        }
    }
}
