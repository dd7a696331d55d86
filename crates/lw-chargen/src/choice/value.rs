//! Lenient field access on externally authored JSON.

use serde_json::Value;

/// A finite number from a JSON number or numeric string.
pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// A non-negative whole number, floored. Anything unusable becomes `fallback`.
pub(crate) fn count(value: Option<&Value>, fallback: u32) -> u32 {
    match number(value) {
        Some(n) if n <= 0.0 => 0,
        Some(n) => n.floor().min(f64::from(u32::MAX)) as u32,
        None => fallback,
    }
}

/// A trimmed, non-empty string from the first key present.
pub(crate) fn text(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A flag from a boolean, a number, or a yes/no style string.
pub(crate) fn flag(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Some(true),
            "false" | "off" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
