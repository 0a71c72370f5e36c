//! Table definitions and plugin assembly

pub mod nature;

use crate::api::{PokeApiClient, ResourceApi};
use crate::config::PluginConfig;
use crate::error::Result;
use crate::plugin::Plugin;
use std::sync::Arc;
use tracing::info;

/// Plugin name
pub const PLUGIN_NAME: &str = "pokemon";

/// Build the plugin against the live API described by `config`
pub fn pokemon_plugin(config: &PluginConfig) -> Result<Plugin> {
    let client = PokeApiClient::from_config(config)?;
    info!(base_url = %config.base_url, page_size = client.page_size(), "pokemon plugin ready");
    Ok(plugin_with_api(Arc::new(client), config))
}

/// Build the plugin over any [`ResourceApi`]
pub fn plugin_with_api(api: Arc<dyn ResourceApi>, config: &PluginConfig) -> Plugin {
    Plugin::new(PLUGIN_NAME).with_table(nature::table(api, &config.ignore_error_messages))
}
