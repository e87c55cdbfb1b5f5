//! Request signing for the Volcengine visual API.
//!
//! The scheme is a close cousin of AWS SigV4: a canonical request is hashed into a
//! string-to-sign, which is then signed with a key derived by chaining HMAC-SHA256
//! over the date, region, service and the literal `request`.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};

use crate::app::util::time;

use super::config::{REGION, SERVICE};

pub const ALGORITHM: &str = "HMAC-SHA256";
pub const SIGNED_HEADERS: &str = "host;x-date";
const SCOPE_TERMINATOR: &str = "request";

/// RFC 3986 unreserved characters stay as-is, everything else (including `*`) is encoded.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

impl Credentials {
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Header values produced by signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub authorization: String,
    pub x_date: String,
}

#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
    region: String,
    service: String,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            region: REGION.to_string(),
            service: SERVICE.to_string(),
        }
    }

    pub fn sign(
        &self,
        method: &str,
        path: &str,
        query: &BTreeMap<String, String>,
        host: &str,
        body: &[u8],
    ) -> Signature {
        self.sign_at(&time::current_time(), method, path, query, host, body)
    }

    pub fn sign_at(
        &self,
        now: &DateTime<Utc>,
        method: &str,
        path: &str,
        query: &BTreeMap<String, String>,
        host: &str,
        body: &[u8],
    ) -> Signature {
        let x_date = time::compact_timestamp(now);
        let date = &x_date[..8];

        let canonical_request = build_canonical_request(
            method,
            path,
            &build_canonical_query_string(query),
            &build_canonical_headers(host, &x_date),
            &hash_hex(body),
        );
        let credential_scope = self.credential_scope(date);
        let string_to_sign = build_string_to_sign(
            &x_date,
            &credential_scope,
            &hash_hex(canonical_request.as_bytes()),
        );

        let signing_key = derive_signing_key(
            &self.credentials.secret_access_key,
            date,
            &self.region,
            &self.service,
        );
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

        let authorization = format!(
            "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            self.credentials.access_key_id(),
        );

        Signature {
            authorization,
            x_date,
        }
    }

    fn credential_scope(&self, date: &str) -> String {
        [date, &self.region, &self.service, SCOPE_TERMINATOR].join("/")
    }
}

pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE_SET).to_string()
}

/// `BTreeMap` iteration is already ascending by key bytes.
pub fn build_canonical_query_string(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{}={}", uri_encode(key), uri_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Includes the trailing newline.
pub fn build_canonical_headers(host: &str, x_date: &str) -> String {
    format!("host:{host}\nx-date:{x_date}\n")
}

pub fn build_canonical_request(
    method: &str,
    path: &str,
    canonical_query: &str,
    canonical_headers: &str,
    payload_hash: &str,
) -> String {
    [
        method.to_uppercase().as_str(),
        path,
        canonical_query,
        canonical_headers,
        SIGNED_HEADERS,
        payload_hash,
    ]
    .join("\n")
}

pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// ```text
/// kDate    = HMAC(secret, date)
/// kRegion  = HMAC(kDate, region)
/// kService = HMAC(kRegion, service)
/// kSigning = HMAC(kService, "request")
/// ```
pub fn derive_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(secret_key.as_bytes(), date.as_bytes());
    let region_key = hmac_sha256(&date_key, region.as_bytes());
    let service_key = hmac_sha256(&region_key, service.as_bytes());
    hmac_sha256(&service_key, SCOPE_TERMINATOR.as_bytes())
}

pub fn hash_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
