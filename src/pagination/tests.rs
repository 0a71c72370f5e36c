//! Tests for pagination module

use super::*;
use crate::api::NamedApiResource;
use crate::error::Error;
use crate::test_support::FakeApi;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn names(items: &[NamedApiResource]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

// ============================================================================
// Offset extraction
// ============================================================================

#[test_case("https://pokeapi.co/api/v2/nature/?offset=20&limit=20", 20 ; "absolute url")]
#[test_case("...?offset=20&limit=20", 20 ; "bare query")]
#[test_case("https://pokeapi.co/api/v2/nature/?limit=20&offset=40", 40 ; "offset not first")]
#[test_case("/nature/?offset=0", 0 ; "zero")]
#[test_case("/nature/?offset=60#top", 60 ; "fragment ignored")]
fn test_extract_url_offset(url: &str, expected: u32) {
    assert_eq!(extract_url_offset(url).unwrap(), expected);
}

#[test_case("https://pokeapi.co/api/v2/nature/?limit=20" ; "no offset parameter")]
#[test_case("https://pokeapi.co/api/v2/nature/" ; "no query string")]
#[test_case("https://pokeapi.co/api/v2/nature/?offset=abc" ; "not a number")]
#[test_case("https://pokeapi.co/api/v2/nature/?offset=-20" ; "negative")]
fn test_extract_url_offset_errors(url: &str) {
    let err = extract_url_offset(url).unwrap_err();
    assert!(matches!(err, Error::OffsetExtraction { .. }), "{err}");
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_stream_resources_follows_all_pages_in_order() {
    let api = FakeApi::new()
        .page(0, &["hardy", "bold"], Some("https://x/nature/?offset=2&limit=2"))
        .page(2, &["modest", "calm"], Some("https://x/nature/?offset=4&limit=2"))
        .page(4, &["quirky"], None);

    let mut items: Vec<NamedApiResource> = Vec::new();
    let state = stream_resources(&api, "nature", &mut items).await.unwrap();

    assert_eq!(names(&items), vec!["hardy", "bold", "modest", "calm", "quirky"]);
    assert_eq!(state.pages, 3);
    assert_eq!(state.total_fetched, 5);
    assert!(state.done);
    assert_eq!(
        api.calls(),
        vec!["list nature 0", "list nature 2", "list nature 4"]
    );
}

#[tokio::test]
async fn test_stream_resources_empty_next_is_single_page() {
    let api = FakeApi::new().page(0, &["hardy"], Some(""));

    let mut items: Vec<NamedApiResource> = Vec::new();
    let state = stream_resources(&api, "nature", &mut items).await.unwrap();

    assert_eq!(names(&items), vec!["hardy"]);
    assert_eq!(state.pages, 1);
    assert_eq!(api.calls(), vec!["list nature 0"]);
}

#[tokio::test]
async fn test_stream_resources_client_error_propagates() {
    let api = FakeApi::new()
        .page(0, &["hardy"], Some("https://x/nature/?offset=20"))
        .list_error(20, 500);

    let mut items: Vec<NamedApiResource> = Vec::new();
    let err = stream_resources(&api, "nature", &mut items)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP 500: boom");
    // Items from earlier pages were already streamed
    assert_eq!(names(&items), vec!["hardy"]);
}

#[tokio::test]
async fn test_stream_resources_bad_next_url_is_hard_error() {
    let api = FakeApi::new().page(0, &["hardy"], Some("https://x/nature/?limit=20"));

    let mut items: Vec<NamedApiResource> = Vec::new();
    let err = stream_resources(&api, "nature", &mut items)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::OffsetExtraction { .. }));
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn test_stream_resources_rejects_non_advancing_offset() {
    let api = FakeApi::new()
        .page(0, &["hardy"], Some("https://x/nature/?offset=20"))
        .page(20, &["bold"], Some("https://x/nature/?offset=20"));

    let mut items: Vec<NamedApiResource> = Vec::new();
    let err = stream_resources(&api, "nature", &mut items)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Pagination { .. }));
    assert_eq!(api.calls().len(), 2);
}

#[test]
fn test_pagination_state() {
    let mut state = PaginationState::new();
    state.add_page(20);
    state.advance_to(20);
    state.add_page(5);
    state.mark_done();

    assert_eq!(
        state,
        PaginationState {
            offset: 20,
            pages: 2,
            total_fetched: 25,
            done: true,
        }
    );
}
