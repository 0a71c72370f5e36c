//! Table schema and execution
//!
//! A [`Table`] pairs a static column list with a [`TableSource`] that knows
//! how to list and get one kind of resource. Each column names exactly one
//! hydrate source and a plain accessor function over the hydrated data, so
//! the column → value mapping is a function table resolved at compile time.

use super::errors::ErrorPredicate;
use super::query::{ListSink, QueryContext, RowSink};
use crate::error::{Error, Result};
use crate::types::{ColumnType, JsonObject, JsonValue};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

// ============================================================================
// Hydrate Data
// ============================================================================

/// Which hydrate call supplies a column's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hydrate {
    /// The row item itself (the listed item, or the detail on the get path)
    Item,
    /// The table's get hydrate
    Get,
}

/// Everything fetched for one row so far
#[derive(Debug, Clone)]
pub struct HydrateData<L, D> {
    /// Listed item, absent when the row came from a get call
    pub item: Option<L>,
    /// Get hydrate result, absent if not needed or ignored
    pub detail: Option<D>,
}

/// Extracts a column value from hydrated data
pub type Accessor<L, D> = fn(&HydrateData<L, D>) -> Option<JsonValue>;

// ============================================================================
// Columns
// ============================================================================

/// A column definition
pub struct Column<L, D> {
    /// Column name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Value type
    pub column_type: ColumnType,
    /// Hydrate call the accessor reads from
    pub hydrate: Hydrate,
    /// Value extraction
    pub accessor: Accessor<L, D>,
}

impl<L, D> Column<L, D> {
    /// Create a column
    pub fn new(
        name: &'static str,
        description: &'static str,
        column_type: ColumnType,
        hydrate: Hydrate,
        accessor: Accessor<L, D>,
    ) -> Self {
        Self {
            name,
            description,
            column_type,
            hydrate,
            accessor,
        }
    }

    /// Evaluate this column, `null` when the source has nothing
    pub fn value(&self, data: &HydrateData<L, D>) -> JsonValue {
        (self.accessor)(data).unwrap_or(JsonValue::Null)
    }

    /// Schema description of this column
    pub fn info(&self) -> ColumnInfo {
        ColumnInfo {
            name: self.name.to_string(),
            description: self.description.to_string(),
            column_type: self.column_type,
            hydrate: self.hydrate,
        }
    }
}

impl<L, D> std::fmt::Debug for Column<L, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("column_type", &self.column_type)
            .field("hydrate", &self.hydrate)
            .finish_non_exhaustive()
    }
}

/// Serializable column schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub hydrate: Hydrate,
}

/// Serializable table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    pub description: String,
    pub columns: Vec<ColumnInfo>,
    /// Columns that select the get path when constrained by equality
    pub key_columns: Vec<String>,
}

// ============================================================================
// Sources
// ============================================================================

/// List and get hydrates for one resource kind
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Type streamed by the list hydrate
    type Item: Send + Sync + 'static;
    /// Type returned by the get hydrate
    type Detail: Send + Sync + 'static;

    /// Stream every resource into `sink`
    async fn list(&self, ctx: &QueryContext, sink: &mut dyn ListSink<Self::Item>) -> Result<()>;

    /// Fetch the detail for `item`, or for the key in `ctx` when `item` is
    /// `None`. `Ok(None)` when there is no key to look up.
    async fn get(&self, ctx: &QueryContext, item: Option<&Self::Item>)
        -> Result<Option<Self::Detail>>;
}

/// Get-path configuration
#[derive(Clone)]
pub struct GetConfig {
    /// Equality on any one of these selects the get path
    pub key_columns: Vec<&'static str>,
    /// Errors this returns true for produce no row instead of failing
    pub should_ignore_error: Option<ErrorPredicate>,
}

impl GetConfig {
    /// Get config keyed on any of `key_columns`
    pub fn any_column(key_columns: &[&'static str]) -> Self {
        Self {
            key_columns: key_columns.to_vec(),
            should_ignore_error: None,
        }
    }

    /// Set the ignore predicate
    #[must_use]
    pub fn ignore_errors(mut self, predicate: ErrorPredicate) -> Self {
        self.should_ignore_error = Some(predicate);
        self
    }

    /// Does the query constrain a key column?
    pub fn applies_to(&self, ctx: &QueryContext) -> bool {
        self.key_columns.iter().any(|k| ctx.qual(k).is_some())
    }

    fn ignores(&self, err: &Error) -> bool {
        self.should_ignore_error.as_ref().is_some_and(|p| p(err))
    }
}

impl std::fmt::Debug for GetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetConfig")
            .field("key_columns", &self.key_columns)
            .field("ignores_errors", &self.should_ignore_error.is_some())
            .finish()
    }
}

// ============================================================================
// Table
// ============================================================================

/// Counters for one query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryStats {
    /// Rows delivered to the sink
    pub rows: u64,
    /// Get hydrate invocations
    pub get_calls: u64,
    /// Get errors treated as "no row"
    pub ignored_errors: u64,
}

/// Runtime-facing view of a table, independent of its item types
#[async_trait]
pub trait QueryTable: Send + Sync {
    /// Table name
    fn name(&self) -> &str;

    /// Schema description
    fn info(&self) -> TableInfo;

    /// Run a query, pushing each row into `sink`
    async fn execute(&self, ctx: &QueryContext, sink: &mut dyn RowSink) -> Result<QueryStats>;
}

type ColumnRefs<'a, S> =
    Vec<&'a Column<<S as TableSource>::Item, <S as TableSource>::Detail>>;

/// A table definition; immutable once built
pub struct Table<S: TableSource> {
    pub name: &'static str,
    pub description: &'static str,
    pub columns: Vec<Column<S::Item, S::Detail>>,
    pub get: Option<GetConfig>,
    pub source: S,
}

impl<S: TableSource> Table<S> {
    /// Columns the query needs, in table order
    ///
    /// Includes columns referenced only by predicates so they can be checked.
    fn plan(&self, ctx: &QueryContext) -> Result<(ColumnRefs<'_, S>, ColumnRefs<'_, S>)> {
        let find = |name: &str| {
            self.columns
                .iter()
                .find(|c| c.name == name)
                .ok_or_else(|| Error::column_not_found(self.name, name))
        };

        let output = match &ctx.columns {
            None => self.columns.iter().collect(),
            Some(wanted) => {
                for name in wanted {
                    find(name.as_str())?;
                }
                self.columns
                    .iter()
                    .filter(|c| wanted.iter().any(|w| w == c.name))
                    .collect()
            }
        };

        let filters = ctx
            .quals
            .keys()
            .map(|name| find(name.as_str()))
            .collect::<Result<Vec<_>>>()?;

        Ok((output, filters))
    }

    /// Run the get hydrate, applying the ignore predicate
    async fn hydrate_get(
        &self,
        ctx: &QueryContext,
        item: Option<&S::Item>,
        stats: &mut QueryStats,
    ) -> Result<Option<S::Detail>> {
        trace!(table = self.name, chained = item.is_some(), "get hydrate");
        stats.get_calls += 1;

        match self.source.get(ctx, item).await {
            Ok(detail) => Ok(detail),
            Err(e) if self.get.as_ref().is_some_and(|g| g.ignores(&e)) => {
                debug!(table = self.name, error = %e, "ignoring get error");
                stats.ignored_errors += 1;
                Ok(None)
            }
            Err(e) => {
                error!(table = self.name, error = %e, "get query_error");
                Err(e)
            }
        }
    }

    /// Build a row if it satisfies every predicate
    fn emit(
        &self,
        ctx: &QueryContext,
        output: &[&Column<S::Item, S::Detail>],
        filters: &[&Column<S::Item, S::Detail>],
        data: &HydrateData<S::Item, S::Detail>,
    ) -> Option<JsonObject> {
        for column in filters {
            let matches = ctx
                .qual(column.name)
                .is_some_and(|q| q.matches(&column.value(data)));
            if !matches {
                return None;
            }
        }

        let mut row = JsonObject::new();
        for column in output {
            let value = column.value(data);
            if !column.column_type.accepts(&value) {
                warn!(
                    table = self.name,
                    column = column.name,
                    expected = %column.column_type,
                    "column value does not match its declared type"
                );
            }
            row.insert(column.name.to_string(), value);
        }
        Some(row)
    }
}

/// List sink that hydrates and emits one row per streamed item
struct RowHydrator<'a, S: TableSource> {
    table: &'a Table<S>,
    ctx: &'a QueryContext,
    output: &'a [&'a Column<S::Item, S::Detail>],
    filters: &'a [&'a Column<S::Item, S::Detail>],
    needs_get: bool,
    sink: &'a mut dyn RowSink,
    stats: QueryStats,
}

#[async_trait]
impl<'a, S: TableSource> ListSink<S::Item> for RowHydrator<'a, S> {
    async fn stream_item(&mut self, item: S::Item) -> Result<()> {
        // One get per row at most; every Get column reads the same result
        let detail = if self.needs_get {
            self.table
                .hydrate_get(self.ctx, Some(&item), &mut self.stats)
                .await?
        } else {
            None
        };

        let data = HydrateData {
            item: Some(item),
            detail,
        };
        if let Some(row) = self.table.emit(self.ctx, self.output, self.filters, &data) {
            self.sink.push_row(row)?;
            self.stats.rows += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl<S: TableSource> QueryTable for Table<S> {
    fn name(&self) -> &str {
        self.name
    }

    fn info(&self) -> TableInfo {
        TableInfo {
            name: self.name.to_string(),
            description: self.description.to_string(),
            columns: self.columns.iter().map(Column::info).collect(),
            key_columns: self
                .get
                .as_ref()
                .map(|g| g.key_columns.iter().map(ToString::to_string).collect())
                .unwrap_or_default(),
        }
    }

    async fn execute(&self, ctx: &QueryContext, sink: &mut dyn RowSink) -> Result<QueryStats> {
        let (output, filters) = self.plan(ctx)?;

        if self.get.as_ref().is_some_and(|g| g.applies_to(ctx)) {
            debug!(table = self.name, quals = ?ctx.quals, "get path");
            let mut stats = QueryStats::default();

            let Some(detail) = self.hydrate_get(ctx, None, &mut stats).await? else {
                return Ok(stats);
            };
            let data = HydrateData {
                item: None,
                detail: Some(detail),
            };
            if let Some(row) = self.emit(ctx, &output, &filters, &data) {
                sink.push_row(row)?;
                stats.rows += 1;
            }
            return Ok(stats);
        }

        debug!(table = self.name, "list path");
        let needs_get = output
            .iter()
            .chain(filters.iter())
            .any(|c| c.hydrate == Hydrate::Get);

        let mut hydrator = RowHydrator {
            table: self,
            ctx,
            output: &output,
            filters: &filters,
            needs_get,
            sink,
            stats: QueryStats::default(),
        };

        // List hydrates log their own failures with paging context
        if let Err(e) = self.source.list(ctx, &mut hydrator).await {
            debug!(table = self.name, error = %e, "list failed");
            return Err(e);
        }

        debug!(
            table = self.name,
            rows = hydrator.stats.rows,
            get_calls = hydrator.stats.get_calls,
            "query complete"
        );
        Ok(hydrator.stats)
    }
}
