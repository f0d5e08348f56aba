//! Serde helpers for tolerant reads of host-authored JSON.
//!
//! Flags and settings are edited by macros and other modules, so field
//! types cannot be trusted. These helpers never fail on a wrong type.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing field behaves the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Coerce a JSON value to an integer.
///
/// Integers pass through, floats truncate toward zero, numeric strings are
/// parsed and booleans count as 1/0. Anything else is `None`.
pub fn coerce_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Deserializes anything number-like as a non-negative counter.
///
/// Negative values clamp to zero and fractions truncate. Values that are not
/// number-like read as zero, so a hand-edited flag never fails the read.
pub fn clamped_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = coerce_number(&value).unwrap_or(0);
    Ok(u32::try_from(n.max(0)).unwrap_or(u32::MAX))
}

/// Deserializes anything number-like as a signed offset; otherwise zero.
pub fn clamped_offset<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = coerce_number(&value).unwrap_or(0);
    Ok(n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Deserializes a string field. Numbers and booleans keep their JSON text;
/// `null`, arrays and objects read as an empty string.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_from(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Like [`lenient_string`] but `None` for anything that is not text.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_from(Value::deserialize(deserializer)?))
}

fn string_from(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
