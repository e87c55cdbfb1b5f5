use std::time::Duration;

use async_trait::async_trait;

/// A fully signed outbound call. The body is sent byte-for-byte as given.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("{message}")]
    Failed {
        status: Option<u16>,
        message: String,
    },
}

/// Seam between the signing client and the network.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(TransportResponse { status, body })
    }
}

fn transport_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        return TransportError::Timeout;
    }

    TransportError::Failed {
        status: e.status().map(|status| status.as_u16()),
        message: e.to_string(),
    }
}
