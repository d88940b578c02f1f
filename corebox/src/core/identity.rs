//! Identifier and timestamp helpers.

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Random UUID v4 in hyphenated form (36 chars).
pub fn id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time as `2019-06-10T12:08:39.643Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Compact form of an ISO timestamp: `2019-06-10T12:08:39.643Z` becomes
/// `20190610_120839_643`.
///
/// A fresh [`timestamp`] is used when `ts` is `None`.
pub fn timestamp_compact(ts: Option<&str>) -> String {
    let ts = ts.map_or_else(timestamp, str::to_string);
    ts.chars()
        .filter_map(|c| match c {
            '-' | ':' | 'Z' => None,
            'T' | '.' => Some('_'),
            other => Some(other),
        })
        .collect()
}
