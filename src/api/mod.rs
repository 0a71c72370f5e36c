//! PokéAPI client module
//!
//! Typed resource structs plus the [`ResourceApi`] seam that tables call.
//! [`PokeApiClient`] implements it over the retrying HTTP client; tests
//! substitute their own implementations.

mod client;
mod types;

pub use client::{fetch_resource, PokeApiClient, ResourceApi};
pub use types::{
    MoveBattleStylePreference, Name, NamedApiResource, NamedApiResourceList, Nature,
    NatureStatChange,
};

/// Default PokéAPI v2 endpoint
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";
