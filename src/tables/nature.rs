//! `pokemon_nature` table

use crate::api::{fetch_resource, NamedApiResource, Nature, ResourceApi};
use crate::error::Result;
use crate::pagination::stream_resources;
use crate::plugin::{
    not_found_error, Column, GetConfig, Hydrate, HydrateData, ListSink, QualValue, QueryContext,
    Table, TableSource, MALFORMED_NOT_FOUND_MESSAGE,
};
use crate::types::{ColumnType, JsonValue};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace};

/// Table name
pub const TABLE_NAME: &str = "pokemon_nature";

/// PokéAPI resource kind backing this table
const RESOURCE: &str = "nature";

type Data = HydrateData<NamedApiResource, Nature>;

/// List and get hydrates for natures
pub struct NatureSource {
    api: Arc<dyn ResourceApi>,
}

impl NatureSource {
    pub fn new(api: Arc<dyn ResourceApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TableSource for NatureSource {
    type Item = NamedApiResource;
    type Detail = Nature;

    async fn list(
        &self,
        _ctx: &QueryContext,
        sink: &mut dyn ListSink<NamedApiResource>,
    ) -> Result<()> {
        trace!("list_natures");
        stream_resources(self.api.as_ref(), RESOURCE, sink).await?;
        Ok(())
    }

    async fn get(
        &self,
        ctx: &QueryContext,
        item: Option<&NamedApiResource>,
    ) -> Result<Option<Nature>> {
        trace!("get_nature");

        let key = match item {
            Some(item) => item.name.clone(),
            None => match ctx.qual("name").or_else(|| ctx.qual("id")) {
                Some(qual) => qual.to_key_string(),
                None => return Ok(None),
            },
        };
        debug!(name = %key, "get_nature");

        // Empty keys, non-string names and non-integer ids can never match
        if key.is_empty()
            || matches!(ctx.qual("name"), Some(QualValue::Int(_)))
            || matches!(ctx.qual("id"), Some(QualValue::String(_)))
        {
            return Ok(None);
        }

        let nature = fetch_resource(self.api.as_ref(), RESOURCE, &key).await?;
        Ok(Some(nature))
    }
}

/// Build the table; `extra_ignore` adds message fragments treated as not found
pub fn table(api: Arc<dyn ResourceApi>, extra_ignore: &[String]) -> Table<NatureSource> {
    // Upstream clients decode PokéAPI's plain-text 404 body as JSON
    let mut ignore = vec![MALFORMED_NOT_FOUND_MESSAGE.to_string()];
    ignore.extend(extra_ignore.iter().cloned());

    Table {
        name: TABLE_NAME,
        description: "Natures influence how a Pokémon's stats grow.",
        columns: columns(),
        get: Some(GetConfig::any_column(&["name", "id"]).ignore_errors(not_found_error(ignore))),
        source: NatureSource::new(api),
    }
}

fn columns() -> Vec<Column<NamedApiResource, Nature>> {
    vec![
        Column::new(
            "name",
            "The name for this resource.",
            ColumnType::String,
            Hydrate::Item,
            name,
        ),
        Column::new(
            "decreased_stat",
            "The stat decreased by 10% in Pokémon with this nature.",
            ColumnType::Json,
            Hydrate::Get,
            |h: &Data| detail(h, |n| to_json(&n.decreased_stat)),
        ),
        Column::new(
            "increased_stat",
            "The stat increased by 10% in Pokémon with this nature.",
            ColumnType::Json,
            Hydrate::Get,
            |h: &Data| detail(h, |n| to_json(&n.increased_stat)),
        ),
        Column::new(
            "hates_flavor",
            "The flavor hated by Pokémon with this nature.",
            ColumnType::Json,
            Hydrate::Get,
            |h: &Data| detail(h, |n| to_json(&n.hates_flavor)),
        ),
        Column::new(
            "likes_flavor",
            "The flavor liked by Pokémon with this nature.",
            ColumnType::Json,
            Hydrate::Get,
            |h: &Data| detail(h, |n| to_json(&n.likes_flavor)),
        ),
        Column::new(
            "pokeathlon_stat_changes",
            "A list of Pokéathlon stats this nature effects and how much it effects them.",
            ColumnType::Json,
            Hydrate::Get,
            |h: &Data| detail(h, |n| to_json(&n.pokeathlon_stat_changes)),
        ),
        Column::new(
            "move_battle_style_preferences",
            "A list of battle styles and how likely a Pokémon with this nature is to use them in the Battle Palace or Battle Tent.",
            ColumnType::Json,
            Hydrate::Get,
            |h: &Data| detail(h, |n| to_json(&n.move_battle_style_preferences)),
        ),
        Column::new(
            "names",
            "The name of this resource listed in different languages.",
            ColumnType::Json,
            Hydrate::Get,
            |h: &Data| detail(h, |n| to_json(&n.names)),
        ),
        Column::new(
            "id",
            "The identifier for this resource.",
            ColumnType::Int,
            Hydrate::Get,
            |h: &Data| detail(h, |n| Some(n.id.into())),
        ),
    ]
}

/// Listed name, or the fetched nature's name on the get path
fn name(h: &Data) -> Option<JsonValue> {
    h.item
        .as_ref()
        .map(|item| item.name.clone())
        .or_else(|| h.detail.as_ref().map(|n| n.name.clone()))
        .map(JsonValue::String)
}

fn detail(h: &Data, f: impl FnOnce(&Nature) -> Option<JsonValue>) -> Option<JsonValue> {
    h.detail.as_ref().and_then(f)
}

fn to_json<T: Serialize>(value: &T) -> Option<JsonValue> {
    serde_json::to_value(value).ok()
}
