use std::fmt;

use serde::{Deserialize, Serialize};

/// A loosely typed attribute value as stored by the host.
///
/// Hosts frequently store numbers as strings (`"12"`) and lists as
/// newline-joined text. The accessors here perform that coercion once, so
/// callers never parse attribute values themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A boolean value.
    Boolean(bool),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A text value.
    String(String),
}

impl AttrValue {
    /// Interpret the value as a finite number.
    ///
    /// Booleans map to 1/0, blank strings to 0. Returns `None` for text that
    /// does not parse or for non-finite floats.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => n.is_finite().then_some(*n),
            Self::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Some(0.0);
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
    }

    /// Interpret the value as a newline-separated list, dropping blank lines.
    pub fn as_lines(&self) -> Vec<String> {
        self.to_string()
            .split('\n')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Build a text value from a list of lines.
    pub fn from_lines(lines: &[String]) -> Self {
        Self::String(lines.join("\n"))
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_from_strings() {
        assert_eq!(AttrValue::from("12").as_number(), Some(12.0));
        assert_eq!(AttrValue::from(" 3.5 ").as_number(), Some(3.5));
        assert_eq!(AttrValue::from("").as_number(), Some(0.0));
        assert_eq!(AttrValue::from("many").as_number(), None);
    }

    #[test]
    fn numbers_from_other_variants() {
        assert_eq!(AttrValue::Integer(-2).as_number(), Some(-2.0));
        assert_eq!(AttrValue::Boolean(true).as_number(), Some(1.0));
        assert_eq!(AttrValue::Float(f64::NAN).as_number(), None);
    }

    #[test]
    fn lines_drop_blanks() {
        let v = AttrValue::from("Smith from Lübeck (cousin)\n\n  Priest from Riga (debtor)  \n");
        assert_eq!(
            v.as_lines(),
            vec!["Smith from Lübeck (cousin)", "Priest from Riga (debtor)"]
        );
        assert!(AttrValue::from("").as_lines().is_empty());
    }

    #[test]
    fn untagged_serde() {
        let v: AttrValue = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(v, AttrValue::String("7".to_string()));
        let v: AttrValue = serde_json::from_str("7").unwrap();
        assert_eq!(v, AttrValue::Integer(7));
        let v: AttrValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, AttrValue::Boolean(true));
    }
}
