use chrono::{DateTime, Utc};

/// Compact ISO 8601 form used by the vendor's `X-Date` header, e.g. `20240102T030405Z`.
pub const COMPACT_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

pub fn current_time() -> DateTime<Utc> {
    Utc::now()
}

pub fn compact_timestamp(time: &DateTime<Utc>) -> String {
    time.format(COMPACT_TIMESTAMP_FORMAT).to_string()
}
