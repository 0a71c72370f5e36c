//! In-memory [`ResourceApi`] for unit tests

use crate::api::{NamedApiResource, NamedApiResourceList, ResourceApi};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// Canned pages and details, with a call log
#[derive(Default)]
pub struct FakeApi {
    pages: BTreeMap<u32, NamedApiResourceList>,
    list_errors: BTreeMap<u32, u16>,
    details: HashMap<String, JsonValue>,
    detail_errors: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `names` at `offset`, linking to `next` when given
    pub fn page(mut self, offset: u32, names: &[&str], next: Option<&str>) -> Self {
        let results = names
            .iter()
            .map(|name| NamedApiResource {
                name: (*name).to_string(),
                url: format!("https://pokeapi.co/api/v2/nature/{name}/"),
            })
            .collect();
        self.pages.insert(
            offset,
            NamedApiResourceList {
                count: 0,
                next: next.map(String::from),
                previous: None,
                results,
            },
        );
        self
    }

    pub fn list_error(mut self, offset: u32, status: u16) -> Self {
        self.list_errors.insert(offset, status);
        self
    }

    /// Serve a nature detail under both its name and id
    pub fn nature(mut self, id: i64, name: &str) -> Self {
        let body = json!({
            "id": id,
            "name": name,
            "increased_stat": {"name": "attack", "url": "https://pokeapi.co/api/v2/stat/2/"},
            "decreased_stat": {"name": "defense", "url": "https://pokeapi.co/api/v2/stat/3/"},
            "likes_flavor": {"name": "spicy", "url": "https://pokeapi.co/api/v2/berry-flavor/1/"},
            "hates_flavor": {"name": "sour", "url": "https://pokeapi.co/api/v2/berry-flavor/5/"},
            "pokeathlon_stat_changes": [
                {"max_change": -1, "pokeathlon_stat": {"name": "skill", "url": "https://pokeapi.co/api/v2/pokeathlon-stat/4/"}}
            ],
            "move_battle_style_preferences": [],
            "names": [{"name": name, "language": {"name": "en", "url": "https://pokeapi.co/api/v2/language/9/"}}]
        });
        self.details.insert(id.to_string(), body.clone());
        self.details.insert(name.to_string(), body);
        self
    }

    pub fn detail_error(mut self, key: &str, message: &str) -> Self {
        self.detail_errors
            .insert(key.to_string(), message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ResourceApi for FakeApi {
    async fn resource_list(&self, kind: &str, offset: u32) -> Result<NamedApiResourceList> {
        self.record(format!("list {kind} {offset}"));
        if let Some(status) = self.list_errors.get(&offset) {
            return Err(Error::http_status(*status, "boom"));
        }
        Ok(self.pages.get(&offset).cloned().unwrap_or_default())
    }

    async fn resource(&self, kind: &str, key: &str) -> Result<JsonValue> {
        self.record(format!("get {kind} {key}"));
        if let Some(message) = self.detail_errors.get(key) {
            return Err(Error::decode(message.clone()));
        }
        self.details
            .get(key)
            .cloned()
            .ok_or_else(|| Error::http_status(404, "Not Found"))
    }
}
