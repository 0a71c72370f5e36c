//! Query inputs and row outputs

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Qualifiers
// ============================================================================

/// Right-hand side of an equality predicate on a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QualValue {
    /// Integer literal
    Int(i64),
    /// String literal
    String(String),
}

impl QualValue {
    /// Borrow as a string, if this is a string qual
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QualValue::String(s) => Some(s),
            QualValue::Int(_) => None,
        }
    }

    /// Get as an integer, if this is an integer qual
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QualValue::Int(i) => Some(*i),
            QualValue::String(_) => None,
        }
    }

    /// Render as a resource lookup key
    pub fn to_key_string(&self) -> String {
        match self {
            QualValue::String(s) => s.clone(),
            QualValue::Int(i) => i.to_string(),
        }
    }

    /// Check whether a column value satisfies this predicate
    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            QualValue::String(s) => value.as_str() == Some(s.as_str()),
            QualValue::Int(i) => value.as_i64() == Some(*i),
        }
    }
}

impl From<&str> for QualValue {
    fn from(value: &str) -> Self {
        QualValue::String(value.to_string())
    }
}

impl From<String> for QualValue {
    fn from(value: String) -> Self {
        QualValue::String(value)
    }
}

impl From<i64> for QualValue {
    fn from(value: i64) -> Self {
        QualValue::Int(value)
    }
}

// ============================================================================
// Query Context
// ============================================================================

/// What the caller asked for: equality predicates and wanted columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryContext {
    /// Column name -> equality predicate
    #[serde(default)]
    pub quals: BTreeMap<String, QualValue>,
    /// Columns to return; `None` means all
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl QueryContext {
    /// Create an empty context (all columns, no predicates)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality predicate
    #[must_use]
    pub fn with_qual(mut self, column: impl Into<String>, value: impl Into<QualValue>) -> Self {
        self.quals.insert(column.into(), value.into());
        self
    }

    /// Restrict the returned columns
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Predicate on `column`, if any
    pub fn qual(&self, column: &str) -> Option<&QualValue> {
        self.quals.get(column)
    }
}

// ============================================================================
// Sinks
// ============================================================================

/// Receives items from a list hydrate, one call per item
#[async_trait]
pub trait ListSink<T: Send + 'static>: Send {
    /// Accept one listed item
    async fn stream_item(&mut self, item: T) -> Result<()>;
}

#[async_trait]
impl<T: Send + 'static> ListSink<T> for Vec<T> {
    async fn stream_item(&mut self, item: T) -> Result<()> {
        self.push(item);
        Ok(())
    }
}

/// Receives finished rows from the executor
pub trait RowSink: Send {
    /// Accept one row
    fn push_row(&mut self, row: JsonObject) -> Result<()>;
}

impl RowSink for Vec<JsonObject> {
    fn push_row(&mut self, row: JsonObject) -> Result<()> {
        self.push(row);
        Ok(())
    }
}

impl RowSink for tokio::sync::mpsc::UnboundedSender<JsonObject> {
    fn push_row(&mut self, row: JsonObject) -> Result<()> {
        self.send(row)
            .map_err(|_| Error::Other("row receiver dropped".to_string()))
    }
}
