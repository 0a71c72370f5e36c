//! Minimal table runtime
//!
//! Owns what a host query engine would otherwise provide: the table
//! registry, get-vs-list selection from key-column predicates, per-row
//! hydration, and delivery of rows to a sink. Execution is sequential;
//! there is no planner, cache, or parallel hydrate scheduling.

mod errors;
mod query;
mod table;

pub use errors::{not_found_error, ErrorPredicate, MALFORMED_NOT_FOUND_MESSAGE};
pub use query::{ListSink, QualValue, QueryContext, RowSink};
pub use table::{
    Accessor, Column, ColumnInfo, GetConfig, Hydrate, HydrateData, QueryStats, QueryTable, Table,
    TableInfo, TableSource,
};

use crate::error::{Error, Result};
use crate::types::JsonObject;
use std::collections::BTreeMap;
use tracing::info;

/// A named set of tables
pub struct Plugin {
    name: String,
    tables: BTreeMap<String, Box<dyn QueryTable>>,
}

impl Plugin {
    /// Create an empty plugin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: BTreeMap::new(),
        }
    }

    /// Register a table, replacing any table with the same name
    #[must_use]
    pub fn with_table(mut self, table: impl QueryTable + 'static) -> Self {
        self.tables
            .insert(table.name().to_string(), Box::new(table));
        self
    }

    /// Plugin name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered table names, sorted
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Look up a table
    pub fn table(&self, name: &str) -> Result<&dyn QueryTable> {
        self.tables
            .get(name)
            .map(|t| &**t)
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// Schemas of every table
    pub fn table_info(&self) -> Vec<TableInfo> {
        self.tables.values().map(|t| t.info()).collect()
    }

    /// Run a query against `table`, streaming rows into `sink`
    pub async fn execute(
        &self,
        table: &str,
        ctx: &QueryContext,
        sink: &mut dyn RowSink,
    ) -> Result<QueryStats> {
        let stats = self.table(table)?.execute(ctx, sink).await?;
        info!(
            plugin = %self.name,
            table,
            rows = stats.rows,
            get_calls = stats.get_calls,
            "query finished"
        );
        Ok(stats)
    }

    /// Run a query and collect the rows
    pub async fn query(&self, table: &str, ctx: &QueryContext) -> Result<Vec<JsonObject>> {
        let mut rows: Vec<JsonObject> = Vec::new();
        self.execute(table, ctx, &mut rows).await?;
        Ok(rows)
    }
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("tables", &self.table_names())
            .finish()
    }
}
