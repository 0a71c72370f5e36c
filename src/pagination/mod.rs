//! Pagination module
//!
//! PokéAPI list endpoints page by numeric offset. Each page carries a `next`
//! URL whose `offset` query parameter is where the following page starts;
//! a missing or empty `next` ends the listing.

mod offset;
mod types;

pub use offset::{extract_url_offset, stream_resources};
pub use types::PaginationState;

#[cfg(test)]
mod tests;
