//! Integration tests using mock HTTP server
//!
//! Tests the full flow: plugin config → HTTP requests against a mock
//! PokéAPI → rows.

use pokemon_tables::plugin::QueryTable;
use pokemon_tables::{pokemon_plugin, Error, PluginConfig, QueryContext};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> PluginConfig {
    PluginConfig {
        base_url: format!("{}/api/v2/", server.uri()),
        page_size: 2,
        max_retries: 0,
        requests_per_second: 0,
        ..PluginConfig::default()
    }
}

fn resource(name: &str, id: u32) -> Value {
    json!({"name": name, "url": format!("https://pokeapi.co/api/v2/nature/{id}/")})
}

fn nature(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "decreased_stat": {"name": "sp-attack", "url": "https://pokeapi.co/api/v2/stat/4/"},
        "increased_stat": {"name": "attack", "url": "https://pokeapi.co/api/v2/stat/2/"},
        "hates_flavor": {"name": "dry", "url": "https://pokeapi.co/api/v2/berry-flavor/2/"},
        "likes_flavor": {"name": "spicy", "url": "https://pokeapi.co/api/v2/berry-flavor/1/"},
        "pokeathlon_stat_changes": [],
        "move_battle_style_preferences": [],
        "names": [{"name": name, "language": {"name": "en", "url": "https://pokeapi.co/api/v2/language/9/"}}]
    })
}

async fn mount_pages(server: &MockServer) {
    let base = format!("{}/api/v2/nature/", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v2/nature/"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": format!("{base}?offset=2&limit=2"),
            "previous": null,
            "results": [resource("hardy", 1), resource("lonely", 2)]
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/nature/"))
        .and(query_param("offset", "2"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": null,
            "previous": format!("{base}?offset=0&limit=2"),
            "results": [resource("brave", 3)]
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// List path
// ============================================================================

#[tokio::test]
async fn test_list_all_pages_in_order() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let plugin = pokemon_plugin(&config_for(&server)).unwrap();
    let ctx = QueryContext::new().with_columns(["name"]);
    let rows = plugin.query("pokemon_nature", &ctx).await.unwrap();

    let names: Vec<&str> = rows.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["hardy", "lonely", "brave"]);
}

#[tokio::test]
async fn test_list_hydrates_detail_columns() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    for (id, name) in [(1, "hardy"), (2, "lonely"), (3, "brave")] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/nature/{name}/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(nature(id, name)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let plugin = pokemon_plugin(&config_for(&server)).unwrap();
    let rows = plugin
        .query("pokemon_nature", &QueryContext::new())
        .await
        .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["name"], "brave");
    assert_eq!(rows[2]["id"], 3);
    assert_eq!(rows[2]["likes_flavor"]["name"], "spicy");
    assert_eq!(rows[0].len(), 9);
}

#[tokio::test]
async fn test_list_server_error_fails_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/nature/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let plugin = pokemon_plugin(&config_for(&server)).unwrap();
    let err = plugin
        .query("pokemon_nature", &QueryContext::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    assert_eq!(err.to_string(), "HTTP 500: upstream down");
}

// ============================================================================
// Get path
// ============================================================================

#[tokio::test]
async fn test_get_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/nature/adamant/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nature(4, "adamant")))
        .expect(1)
        .mount(&server)
        .await;

    let plugin = pokemon_plugin(&config_for(&server)).unwrap();
    let ctx = QueryContext::new().with_qual("name", "adamant");
    let rows = plugin.query("pokemon_nature", &ctx).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "adamant");
    assert_eq!(rows[0]["decreased_stat"]["name"], "sp-attack");
}

#[tokio::test]
async fn test_get_unknown_name_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/nature/missingno/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let plugin = pokemon_plugin(&config_for(&server)).unwrap();
    let ctx = QueryContext::new().with_qual("name", "missingno");
    let rows = plugin.query("pokemon_nature", &ctx).await.unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_get_empty_name_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let plugin = pokemon_plugin(&config_for(&server)).unwrap();
    let ctx = QueryContext::new().with_qual("name", "");
    let rows = plugin.query("pokemon_nature", &ctx).await.unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_get_garbage_body_propagates_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/nature/hardy/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": "))
        .mount(&server)
        .await;

    let plugin = pokemon_plugin(&config_for(&server)).unwrap();
    let ctx = QueryContext::new().with_qual("name", "hardy");
    let err = plugin.query("pokemon_nature", &ctx).await.unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

// ============================================================================
// Schema
// ============================================================================

#[test]
fn test_plugin_schema() {
    let plugin = pokemon_plugin(&PluginConfig::default()).unwrap();

    assert_eq!(plugin.name(), "pokemon");
    assert_eq!(plugin.table_names(), vec!["pokemon_nature"]);

    let table = plugin.table("pokemon_nature").unwrap();
    let info = table.info();
    assert_eq!(info.description, "Natures influence how a Pokémon's stats grow.");
    assert_eq!(info.columns.len(), 9);

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["columns"][8]["name"], "id");
    assert_eq!(json["columns"][8]["type"], "int");
}
