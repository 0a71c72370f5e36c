//! Offset pagination driven by `next` URLs

use super::types::PaginationState;
use crate::api::{NamedApiResource, ResourceApi};
use crate::error::{Error, Result};
use crate::plugin::ListSink;
use crate::types::OptionStringExt;
use tracing::{debug, error};

/// Extract the numeric `offset` query parameter from a next-page URL
///
/// Accepts absolute URLs and bare query strings alike, so
/// `"...?offset=20&limit=20"` yields `20`.
pub fn extract_url_offset(next: &str) -> Result<u32> {
    let without_fragment = next.split('#').next().unwrap_or_default();
    let query = without_fragment
        .split_once('?')
        .map(|(_, q)| q)
        .ok_or_else(|| Error::offset(next, "URL has no query string"))?;

    let value = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "offset")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| Error::offset(next, "missing 'offset' query parameter"))?;

    value
        .parse::<u32>()
        .map_err(|e| Error::offset(next, format!("invalid offset '{value}': {e}")))
}

/// Stream every `kind` resource into `sink`, page by page, starting at offset 0
///
/// Client and offset errors abort the listing and are returned as-is after
/// being logged. Nothing is retried here.
pub async fn stream_resources(
    api: &dyn ResourceApi,
    kind: &str,
    sink: &mut dyn ListSink<NamedApiResource>,
) -> Result<PaginationState> {
    let mut state = PaginationState::new();

    loop {
        let page = match api.resource_list(kind, state.offset).await {
            Ok(page) => page,
            Err(e) => {
                error!(kind, offset = state.offset, error = %e, "query_error");
                return Err(e);
            }
        };

        let count = page.results.len();
        for item in page.results {
            sink.stream_item(item).await?;
        }
        state.add_page(count);

        let Some(next) = page.next.none_if_empty() else {
            state.mark_done();
            break;
        };

        let offset = match extract_url_offset(&next) {
            Ok(offset) => offset,
            Err(e) => {
                error!(kind, next = %next, error = %e, "extract_url_offset_error");
                return Err(e);
            }
        };

        // A non-advancing next link would otherwise loop forever
        if offset <= state.offset {
            let e = Error::pagination(
                kind,
                format!("next offset {offset} does not advance past {}", state.offset),
            );
            error!(kind, error = %e, "extract_url_offset_error");
            return Err(e);
        }

        debug!(kind, offset, pages = state.pages, "following next page");
        state.advance_to(offset);
    }

    debug!(
        kind,
        pages = state.pages,
        items = state.total_fetched,
        "listing complete"
    );
    Ok(state)
}
