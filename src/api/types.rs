//! PokéAPI resource shapes
//!
//! Only the fields the tables expose are modelled. Everything is defaulted
//! so a partial payload still decodes.

use serde::{Deserialize, Serialize};

/// Reference to another named resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApiResource {
    /// The name of the referenced resource
    #[serde(default)]
    pub name: String,
    /// The URL of the referenced resource
    #[serde(default)]
    pub url: String,
}

/// One page of a resource list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApiResourceList {
    /// Total number of resources available
    #[serde(default)]
    pub count: u32,
    /// URL of the next page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
    /// Resources on this page
    #[serde(default)]
    pub results: Vec<NamedApiResource>,
}

/// A localized name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    /// The localized name
    #[serde(default)]
    pub name: String,
    /// The language this name is in
    #[serde(default)]
    pub language: NamedApiResource,
}

/// How much a nature changes a Pokéathlon stat
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatureStatChange {
    /// The amount of change
    #[serde(default)]
    pub max_change: i32,
    /// The stat being affected
    #[serde(default)]
    pub pokeathlon_stat: NamedApiResource,
}

/// Battle style preference of a nature in the Battle Palace or Battle Tent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBattleStylePreference {
    /// Chance of using the move, in percent, if HP is under one half
    #[serde(default)]
    pub low_hp_preference: i32,
    /// Chance of using the move, in percent, if HP is over one half
    #[serde(default)]
    pub high_hp_preference: i32,
    /// The move battle style
    #[serde(default)]
    pub move_battle_style: NamedApiResource,
}

/// Natures influence how a Pokémon's stats grow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nature {
    /// The identifier for this resource
    #[serde(default)]
    pub id: i64,
    /// The name for this resource
    #[serde(default)]
    pub name: String,
    /// The stat decreased by 10% in Pokémon with this nature
    #[serde(default)]
    pub decreased_stat: Option<NamedApiResource>,
    /// The stat increased by 10% in Pokémon with this nature
    #[serde(default)]
    pub increased_stat: Option<NamedApiResource>,
    /// The flavor hated by Pokémon with this nature
    #[serde(default)]
    pub hates_flavor: Option<NamedApiResource>,
    /// The flavor liked by Pokémon with this nature
    #[serde(default)]
    pub likes_flavor: Option<NamedApiResource>,
    /// Pokéathlon stats this nature affects
    #[serde(default)]
    pub pokeathlon_stat_changes: Vec<NatureStatChange>,
    /// Battle styles and how likely a Pokémon with this nature is to use them
    #[serde(default)]
    pub move_battle_style_preferences: Vec<MoveBattleStylePreference>,
    /// The name of this resource listed in different languages
    #[serde(default)]
    pub names: Vec<Name>,
}
