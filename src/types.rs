//! Common types used throughout pokemon-tables
//!
//! Shared type aliases and small enums used by more than one module.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type, also the shape of an emitted row
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Column Type
// ============================================================================

/// Value type of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// UTF-8 text
    String,
    /// 64-bit integer
    Int,
    /// Arbitrary JSON blob
    Json,
}

impl ColumnType {
    /// Check whether a value fits this column type (null fits everything)
    pub fn accepts(&self, value: &JsonValue) -> bool {
        match (self, value) {
            (_, JsonValue::Null) | (ColumnType::Json, _) => true,
            (ColumnType::String, JsonValue::String(_)) => true,
            (ColumnType::Int, JsonValue::Number(n)) => n.is_i64() || n.is_u64(),
            _ => false,
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::String => write!(f, "string"),
            ColumnType::Int => write!(f, "int"),
            ColumnType::Json => write!(f, "json"),
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_type_accepts() {
        assert!(ColumnType::String.accepts(&json!("hardy")));
        assert!(ColumnType::Int.accepts(&json!(1)));
        assert!(ColumnType::Json.accepts(&json!({"name": "attack"})));
        assert!(ColumnType::Int.accepts(&JsonValue::Null));

        assert!(!ColumnType::Int.accepts(&json!("1")));
        assert!(!ColumnType::Int.accepts(&json!(1.5)));
        assert!(!ColumnType::String.accepts(&json!([])));
    }

    #[test]
    fn test_column_type_serde() {
        let ty: ColumnType = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(ty, ColumnType::Json);
        assert_eq!(serde_json::to_string(&ColumnType::Int).unwrap(), "\"int\"");
        assert_eq!(ColumnType::String.to_string(), "string");
    }

    #[test]
    fn test_backoff_default() {
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("next".to_string()).none_if_empty(),
            Some("next".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
    }
}
