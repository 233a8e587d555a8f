//! Pokemon lookup
//!
//! The HTTP layer depends only on [`PokemonLookup`]; the networked
//! implementation is [`PokeApiService`].

use async_trait::async_trait;
use reqwest::Url;

use crate::types::LookupOutcome;

mod dto;
pub mod pokeapi;

pub use pokeapi::PokeApiService;

/// Capability to resolve a pokemon name into its details
#[async_trait]
pub trait PokemonLookup: Send + Sync {
    async fn lookup(&self, name: &str) -> LookupOutcome;
}

/// Lookup settings
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Upstream API root, e.g. `https://pokeapi.co/api/v2`
    pub base_url: Url,
    /// Language tag used to pick the flavor text entry
    pub language: String,
}

impl LookupConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            language: "en".to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}
