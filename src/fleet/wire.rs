//! Serde adapters for the control API's wire conventions
//!
//! The backend reports booleans as the strings `"true"`/`"false"` and numbers
//! either as JSON numbers or as numeric strings. These adapters are the only
//! place that knows about those encodings.
//!
//! A single malformed record must not reject the whole fleet, so statuses,
//! flags and collections fall back to a neutral value instead of failing.

use crate::fleet::model::CrawlerStatus;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Parses a `"true"`/`"false"` flag, ignoring case and surrounding whitespace
pub fn parse_flag(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Renders a flag in the backend's string form
pub fn flag_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Parses an integer field the way operators type it: surrounding whitespace
/// is ignored and leading zeros are accepted (`"042"` is 42)
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// String-serialized boolean (`"true"`/`"false"` ↔ `bool`)
///
/// Native JSON booleans are accepted on input; output is always the string form.
/// Anything that is not recognizably `true` reads as `false`.
pub mod string_bool {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(flag_str(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let flag = match Value::deserialize(deserializer)? {
            Value::Bool(value) => value,
            Value::String(text) => parse_flag(&text).unwrap_or_else(|| {
                tracing::warn!("Unrecognized flag value {:?}, reading it as false", text);
                false
            }),
            Value::Null => false,
            other => {
                tracing::warn!("Unrecognized flag value {}, reading it as false", other);
                false
            }
        };
        Ok(flag)
    }
}

/// Integer that may arrive as a JSON number or a numeric string
pub fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Option::<RawScalar>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawScalar::Int(value)) => Ok(value),
        Some(RawScalar::Float(value)) if value.is_finite() && value.fract() == 0.0 => {
            Ok(value as i64)
        }
        Some(RawScalar::Text(text)) => parse_int(&text)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {:?}", text))),
        Some(_) => Err(D::Error::custom("expected an integer")),
    }
}

/// Decimal quantity that may arrive as a JSON number or a numeric string
pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Option::<RawScalar>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(RawScalar::Int(value)) => Ok(value as f64),
        Some(RawScalar::Float(value)) => Ok(value),
        Some(RawScalar::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, got {:?}", text))),
        Some(RawScalar::Bool(_)) => Err(D::Error::custom("expected a number")),
    }
}

/// Free-text field that may arrive as a string, a number, or null
pub fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Option::<RawScalar>::deserialize(deserializer)? {
        None => Ok(String::new()),
        Some(RawScalar::Text(text)) => Ok(text),
        Some(RawScalar::Int(value)) => Ok(value.to_string()),
        Some(RawScalar::Float(value)) => Ok(value.to_string()),
        Some(RawScalar::Bool(value)) => Ok(flag_str(value).to_string()),
    }
}

/// Status that may arrive as any string, `null`, or a non-string value
///
/// Only the four known strings map to a known status; everything else,
/// including a missing or `null` value, becomes `CrawlerStatus::Unknown`.
pub fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CrawlerStatus, D::Error> {
    let status = match Value::deserialize(deserializer)? {
        Value::String(text) => CrawlerStatus::from(text),
        Value::Null => CrawlerStatus::default(),
        other => CrawlerStatus::Unknown(other.to_string()),
    };
    Ok(status)
}

/// Collection (or any defaultable value) where `null` means empty
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
