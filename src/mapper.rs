//! Mapping from the open-notify wire shape onto [`PositionRecord`].
//!
//! The API sends:
//!
//! ```text
//! {
//!   "timestamp": 1709547901,
//!   "iss_position": { "latitude": "-47.1606", "longitude": "34.2791" },
//!   "message": "success"
//! }
//! ```
//!
//! which differs from the record in three ways: the timestamp is epoch
//! seconds rather than a civil date-time, the coordinates are nested one
//! level down, and they arrive as strings instead of numbers.
//!
//! Mapping is strict. Every key must be present with the expected JSON
//! kind; nothing is defaulted. Unknown keys are ignored. The mapper does
//! no I/O and no logging.

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde_json::Value;

use crate::model::PositionRecord;

/// Why a document could not be mapped.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// The key is absent or holds the wrong kind of JSON value.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid number in {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

pub type Result<T> = core::result::Result<T, MappingError>;

/// Parse `raw` as JSON and map it onto a record.
///
/// `zone` decides how the epoch timestamp becomes a civil date-time. The
/// API transmits no zone of its own, so the same input yields different
/// `observed_at` values under different zones.
pub fn map(raw: &str, zone: &TimeZone) -> Result<PositionRecord> {
    let doc: Value = serde_json::from_str(raw)?;
    map_value(&doc, zone)
}

/// Map an already parsed document onto a record.
pub fn map_value(doc: &Value, zone: &TimeZone) -> Result<PositionRecord> {
    let seconds = doc
        .get("timestamp")
        .and_then(epoch_seconds)
        .ok_or(MappingError::MissingField("timestamp"))?;

    let message = doc
        .get("message")
        .and_then(Value::as_str)
        .ok_or(MappingError::MissingField("message"))?;

    let position = doc
        .get("iss_position")
        .filter(|v| v.is_object())
        .ok_or(MappingError::MissingField("iss_position"))?;

    let latitude = coordinate(position, "latitude")?;
    let longitude = coordinate(position, "longitude")?;

    let instant =
        Timestamp::from_second(seconds).map_err(|_| MappingError::TimestampOutOfRange(seconds))?;

    Ok(PositionRecord::new(
        zone.to_datetime(instant),
        message.to_string(),
        latitude,
        longitude,
    ))
}

/// Read an integral number of seconds.
///
/// Whole numbers written in float form (`1709547901.0`) are accepted;
/// anything with a fractional part or outside `i64` is not.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn epoch_seconds(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if f.trunc() == f && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Read a coordinate sent as a decimal string.
fn coordinate(position: &Value, field: &'static str) -> Result<f64> {
    let raw = position
        .get(field)
        .and_then(Value::as_str)
        .ok_or(MappingError::MissingField(field))?;

    // `f64::from_str` also accepts "NaN" and "inf", which are not decimals.
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(MappingError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}
