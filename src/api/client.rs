//! PokéAPI client
//!
//! Two calls are all the tables need: one page of a resource list, and one
//! resource by name or id.

use super::types::NamedApiResourceList;
use crate::config::PluginConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// The API surface table hydrate functions call into
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Fetch one page of `kind` resources starting at `offset`
    async fn resource_list(&self, kind: &str, offset: u32) -> Result<NamedApiResourceList>;

    /// Fetch a single `kind` resource by name or numeric id
    async fn resource(&self, kind: &str, key: &str) -> Result<JsonValue>;
}

/// Fetch a single resource and decode it into `T`
pub async fn fetch_resource<T: DeserializeOwned>(
    api: &dyn ResourceApi,
    kind: &str,
    key: &str,
) -> Result<T> {
    let value = api.resource(kind, key).await?;
    serde_json::from_value(value).map_err(|e| Error::decode(e.to_string()))
}

/// HTTP-backed [`ResourceApi`]
#[derive(Debug)]
pub struct PokeApiClient {
    http: HttpClient,
    base_url: Url,
    page_size: u32,
}

impl PokeApiClient {
    /// Create a client over an existing HTTP client
    pub fn new(http: HttpClient, base_url: &str, page_size: u32) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_value("base_url", "must be a hierarchical URL"));
        }

        Ok(Self {
            http,
            base_url,
            page_size,
        })
    }

    /// Create a client from plugin configuration
    pub fn from_config(config: &PluginConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.http_client_config())?;
        Self::new(http, &config.base_url, config.page_size)
    }

    /// Number of resources requested per list page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Build `{base}/{segments...}/` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::invalid_value("base_url", "must be a hierarchical URL"))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }
}

#[async_trait]
impl ResourceApi for PokeApiClient {
    async fn resource_list(&self, kind: &str, offset: u32) -> Result<NamedApiResourceList> {
        let url = self.endpoint(&[kind])?;
        debug!(kind, offset, limit = self.page_size, "fetching resource page");

        let request = RequestConfig::new()
            .query("offset", offset)
            .query("limit", self.page_size);
        self.http.get_json_with_config(url.as_str(), request).await
    }

    async fn resource(&self, kind: &str, key: &str) -> Result<JsonValue> {
        if key.is_empty() {
            return Err(Error::Other(format!("empty key for '{kind}' lookup")));
        }
        let url = self.endpoint(&[kind, key])?;
        debug!(kind, key, "fetching resource");

        self.http.get_json(url.as_str()).await
    }
}
