//! Lenient request field deserializers
//!
//! Dashboard forms post numbers and booleans as strings; these accept both
//! forms. Use with `#[serde(default, deserialize_with = "...")]` so absent
//! fields stay `None`.

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

fn lenient_i32(value: Value) -> Result<Option<i32>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| format!("expected an integer, got {}", n)),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| format!("expected an integer, got \"{}\"", s)),
        other => Err(format!("expected an integer, got {}", other)),
    }
}

fn lenient_bool(value: Value) -> Result<Option<bool>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "on" | "yes" => Ok(Some(true)),
            "false" | "0" | "off" | "no" => Ok(Some(false)),
            _ => Err(format!("expected a boolean, got \"{}\"", s)),
        },
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(Some(false)),
            Some(1) => Ok(Some(true)),
            _ => Err(format!("expected a boolean, got {}", n)),
        },
        other => Err(format!("expected a boolean, got {}", other)),
    }
}

/// Integer given as a number or numeric string; null and "" are `None`
pub fn opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_i32(Value::deserialize(deserializer)?).map_err(de::Error::custom)
}

/// Like [`opt_i32`], but an explicit null becomes `Some(None)`
pub fn nullable_i32<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_i32(deserializer).map(Some)
}

/// Boolean given as a JSON bool, `0`/`1` or a string such as `"true"`
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_bool(Value::deserialize(deserializer)?).map_err(de::Error::custom)
}

/// Distinguish an explicit null (`Some(None)`) from an absent field (`None`)
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
