//! Timestamp revival for loaded payloads.
//!
//! Durable payloads carry timestamps as ISO-8601 strings. Before a loaded
//! payload is deserialized into typed collections, a deep walk rewrites
//! every timestamp string into canonical RFC 3339 form so the typed layer
//! sees uniform values regardless of how the payload was written:
//!
//! - any value under a key literally named `createdAt` or `joinedDate` must
//!   be a parseable timestamp, nested arbitrarily deep (posts embed
//!   comments, which embed their own `createdAt`);
//! - any other string whose entirety parses as an ISO-8601 date-time (and
//!   which starts with a `YYYY-MM-DDTHH:MM:SS` prefix) is normalized as
//!   well, regardless of key;
//! - zone-less timestamps are interpreted as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::ReviveError;

static ISO_DATETIME_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("hardcoded regex is valid")
});

/// Keys whose values are unconditionally timestamps.
const DATE_KEYS: [&str; 2] = ["createdAt", "joinedDate"];

/// Walk `value` and rewrite timestamp strings to canonical RFC 3339.
///
/// Fails only when a value under a date-typed key cannot be parsed; the
/// store adapter treats that as payload corruption and falls back to seed
/// data.
pub fn revive_dates(value: Value) -> Result<Value, ReviveError> {
    Ok(match value {
        Value::String(s) => match parse_datetime(&s) {
            Some(ts) if ISO_DATETIME_PREFIX.is_match(&s) => Value::String(canonical(ts)),
            _ => Value::String(s),
        },
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(revive_dates)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, entry) in map {
                let revived = if DATE_KEYS.contains(&key.as_str()) {
                    coerce_timestamp(&key, entry)?
                } else {
                    revive_dates(entry)?
                };
                out.insert(key, revived);
            }
            Value::Object(out)
        }
        other => other,
    })
}

fn coerce_timestamp(field: &str, value: Value) -> Result<Value, ReviveError> {
    let parsed = value.as_str().and_then(parse_datetime);
    match parsed {
        Some(ts) => Ok(Value::String(canonical(ts))),
        None => Err(ReviveError {
            field: field.to_string(),
        }),
    }
}

/// Parse a timestamp string, accepting RFC 3339 as well as zone-less
/// ISO-8601 (assumed UTC). The whole string must parse; strings that merely
/// start with a date-time are left untouched by the caller.
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn canonical(ts: DateTime<Utc>) -> String {
    // AutoSi keeps the exact sub-second precision of the source value, so a
    // save/load cycle never truncates timestamps.
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
