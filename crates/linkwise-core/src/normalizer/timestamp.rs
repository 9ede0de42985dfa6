//! Epoch timestamp conversion

use crate::payload::Payload;
use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 rendering of a Unix epoch value, in UTC with second precision
///
/// `None` when the value is not a number or falls outside the representable
/// range; such fields are kept as they are.
pub fn xmlschema(value: &Payload) -> Option<String> {
    let seconds = match value {
        Payload::Scalar(serde_json::Value::Number(n)) => match n.as_i64() {
            Some(secs) => secs,
            None => {
                let secs = n.as_f64().filter(|f| f.is_finite())?;
                secs.floor() as i64
            }
        },
        _ => return None,
    };

    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Secs, true))
}
