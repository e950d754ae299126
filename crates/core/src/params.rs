//! Helpers for reading typed values out of a `serde_json::Value` params
//! object.
//!
//! Scene constructors accept a JSON object of overrides; these helpers make
//! extraction total by falling back to a default whenever the key is
//! missing or has the wrong type.

use serde_json::Value;

/// Reads `params[name]` as f64, or `default` if absent or mistyped.
/// Integer JSON numbers convert.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads `params[name]` as usize, or `default` if absent, negative,
/// fractional, or mistyped.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Reads `params[name]` as bool, or `default` if absent or mistyped.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}
