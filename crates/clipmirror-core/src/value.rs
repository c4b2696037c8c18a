//! Scalar values exchanged with the host graph

use serde::{Deserialize, Serialize};

/// One scalar as the host delivers it: the host freely mixes integers,
/// floats, and marker tokens in its flat result lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl HostValue {
    /// Numeric interpretation, if any. Strings are parsed (the host
    /// sometimes stringifies ids); marker tokens yield `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HostValue::Int(v) => Some(*v),
            HostValue::Float(v) if v.is_finite() => Some(*v as i64),
            HostValue::Float(_) => None,
            HostValue::Str(s) => s.trim().parse::<i64>().ok(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HostValue::Int(v) => Some(*v as f64),
            HostValue::Float(v) => Some(*v),
            HostValue::Str(s) => s.trim().parse::<f64>().ok(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for HostValue {
    fn from(v: i64) -> Self {
        HostValue::Int(v)
    }
}

impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        HostValue::Float(v)
    }
}

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        HostValue::Str(v.to_string())
    }
}

impl From<String> for HostValue {
    fn from(v: String) -> Self {
        HostValue::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(HostValue::Int(12).as_i64(), Some(12));
        assert_eq!(HostValue::Float(12.0).as_i64(), Some(12));
        assert_eq!(HostValue::Str("12".into()).as_i64(), Some(12));
        assert_eq!(HostValue::Str("id".into()).as_i64(), None);
        assert_eq!(HostValue::Float(f64::NAN).as_i64(), None);
    }
}
