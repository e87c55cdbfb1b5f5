use std::{collections::BTreeMap, sync::Arc};

use serde::{de::DeserializeOwned, de::IgnoredAny, Serialize};

use super::{
    config::{API_PATH, API_VERSION},
    errors::JimengError,
    signer::{build_canonical_query_string, Credentials, Signer},
    structs::jimeng_response::JimengResponse,
    transport::{HttpTransport, TransportError, TransportRequest, TransportResponse},
};

const METHOD: &str = "POST";

/// One signed call to the vision API.
///
/// The body is fixed at construction: the bytes that were hashed into the signature are
/// the bytes that get sent.
#[derive(Debug)]
pub struct SignedRequest {
    url: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl SignedRequest {
    pub fn new(signer: &Signer, host: &str, action: &str, body: String) -> Self {
        let query = BTreeMap::from([
            ("Action".to_string(), action.to_string()),
            ("Version".to_string(), API_VERSION.to_string()),
        ]);

        let signature = signer.sign(METHOD, API_PATH, &query, host, body.as_bytes());

        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Host".to_string(), host.to_string()),
            ("X-Date".to_string(), signature.x_date),
            ("Authorization".to_string(), signature.authorization),
        ];
        let url = format!(
            "https://{}{}?{}",
            host,
            API_PATH,
            build_canonical_query_string(&query)
        );

        Self { url, headers, body }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn into_transport_request(self) -> TransportRequest {
        TransportRequest {
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

pub struct JimengClient {
    signer: Signer,
    host: String,
    transport: Arc<dyn HttpTransport>,
}

impl JimengClient {
    pub fn new(credentials: Credentials, host: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            signer: Signer::new(credentials),
            host: host.to_string(),
            transport,
        }
    }

    /// Signs and sends `action` with `body`, returning the decoded envelope once the vendor
    /// has accepted the call. Nothing is retried here.
    pub async fn call<B, T>(&self, action: &str, body: &B) -> Result<JimengResponse<T>, JimengError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(body)?;
        let request = SignedRequest::new(&self.signer, &self.host, action, body);

        tracing::debug!(action, url = request.url(), "calling vision api");

        let response = match self.transport.post(request.into_transport_request()).await {
            Ok(response) => response,
            Err(TransportError::Timeout) => {
                tracing::warn!(action, "vision api call timed out");
                return Err(JimengError::Timeout);
            }
            Err(TransportError::Failed { status, message }) => {
                tracing::warn!(action, ?status, %message, "vision api call failed");
                return Err(JimengError::Unknown { status });
            }
        };

        parse_response(action, response)
    }
}

impl std::fmt::Debug for JimengClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JimengClient")
            .field("signer", &self.signer)
            .field("host", &self.host)
            .finish()
    }
}

fn parse_response<T: DeserializeOwned>(
    action: &str,
    response: TransportResponse,
) -> Result<JimengResponse<T>, JimengError> {
    let status = response.status;

    match status {
        429 => return Err(JimengError::RateLimited),
        401 | 403 => return Err(JimengError::AuthFailure),
        _ => {}
    }

    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<JimengResponse<IgnoredAny>>(&response.body)
            .ok()
            .and_then(|envelope| envelope.vendor_message());

        tracing::warn!(action, status, body = %response.body, "vision api returned an error status");

        return match message {
            Some(message) => Err(JimengError::Vendor(message)),
            None => Err(JimengError::Unknown {
                status: Some(status),
            }),
        };
    }

    let envelope: JimengResponse<T> = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(action, %e, body = %response.body, "failed to decode vision api response");
            return Err(JimengError::Unknown {
                status: Some(status),
            });
        }
    };

    if let Some(message) = envelope.error_message() {
        tracing::warn!(action, request_id = ?envelope.request_id, %message, "vision api rejected the call");
        return Err(JimengError::Vendor(message));
    }

    Ok(envelope)
}
