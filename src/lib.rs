// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]

//! # pokemon-tables
//!
//! PokéAPI resources exposed as queryable tables.
//!
//! Each table is a static column list plus two hydrates: **list** walks the
//! offset-paginated resource index, **get** fetches one resource by key.
//! Columns map to plain accessor functions over the typed API structs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pokemon_tables::{pokemon_plugin, PluginConfig, QueryContext, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     pokemon_tables::logging::init("info");
//!     let plugin = pokemon_plugin(&PluginConfig::default())?;
//!
//!     // Get path: equality on a key column
//!     let ctx = QueryContext::new().with_qual("name", "adamant");
//!     let rows = plugin.query("pokemon_nature", &ctx).await?;
//!
//!     // List path: only the list hydrate runs for `name`
//!     let ctx = QueryContext::new().with_columns(["name"]);
//!     let rows = plugin.query("pokemon_nature", &ctx).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Layout
//!
//! ```text
//! http ─► api ─► pagination ─► tables ─► plugin
//!  (retry,   (ResourceApi,  (next-URL     (schema +   (registry,
//!   rate      PokeApiClient) offsets)      hydrates)   executor)
//!   limit)
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connection configuration
pub mod config;

/// Tracing setup
pub mod logging;

/// HTTP client with retry and rate limiting
pub mod http;

/// PokéAPI client and resource types
pub mod api;

/// Offset pagination over next-page URLs
pub mod pagination;

/// Table runtime: schema, query context, executor
pub mod plugin;

/// Table definitions
pub mod tables;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::PluginConfig;
pub use error::{Error, Result};
pub use plugin::{Plugin, QualValue, QueryContext, QueryStats, RowSink, TableInfo};
pub use tables::{plugin_with_api, pokemon_plugin};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
