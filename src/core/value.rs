//! Structural classification of resolver result values
//!
//! Resolver results are plain `serde_json::Value` trees. Validation and
//! shaping never duck-type: they classify a value into a [`ValueKind`] and
//! pattern-match exhaustively on it.

use serde_json::Value;
use std::fmt;

/// The structural kind of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    List,
    Object,
}

impl ValueKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Whether this kind is a scalar (not a list or object).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ValueKind::List | ValueKind::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Object => "object",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of_covers_all_variants() {
        assert_eq!(ValueKind::of(&Value::Null), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Bool);
        assert_eq!(ValueKind::of(&json!(1)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([1, 2])), ValueKind::List);
        assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Object);
    }

    #[test]
    fn test_is_scalar() {
        assert!(ValueKind::String.is_scalar());
        assert!(ValueKind::Number.is_scalar());
        assert!(ValueKind::Null.is_scalar());
        assert!(!ValueKind::List.is_scalar());
        assert!(!ValueKind::Object.is_scalar());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ValueKind::Object.to_string(), "object");
        assert_eq!(ValueKind::List.to_string(), "list");
        assert_eq!(ValueKind::Bool.to_string(), "boolean");
    }
}
