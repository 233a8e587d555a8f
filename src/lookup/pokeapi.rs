//! PokeAPI-backed lookup
//!
//! Two strictly sequential calls: `GET {base}/pokemon/{name}`, then the
//! species resource linked from that payload.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::dto::{PokemonDto, SpeciesDto};
use super::{LookupConfig, PokemonLookup};
use crate::types::{LookupOutcome, PokemonDetails};
use crate::upstream::UpstreamPool;
use crate::{Error, Result};

/// Reason reported for every upstream failure; the cause is only logged.
pub const FETCH_FAILED: &str = "Failed to fetch data from PokeAPI";

/// Lookup service that queries PokeAPI over the shared connection pool
pub struct PokeApiService {
    pool: Arc<UpstreamPool>,
    config: LookupConfig,
}

impl PokeApiService {
    pub fn new(pool: Arc<UpstreamPool>, config: LookupConfig) -> Self {
        Self { pool, config }
    }

    /// Fetch and join both resources.
    ///
    /// Returns `Ok(None)` only when the pokemon resource itself is missing.
    pub async fn fetch_details(&self, name: &str) -> Result<Option<PokemonDetails>> {
        let client = self.pool.client().await?;

        let response = client.get(self.pokemon_url(name)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let pokemon: PokemonDto = decode(ensure_success(response, "pokemon")?, "pokemon").await?;

        let species_url = Url::parse(&pokemon.species.url).map_err(|e| {
            Error::invalid_url(format!("species url '{}': {}", pokemon.species.url, e))
        })?;
        let response = client.get(species_url).send().await?;
        let species: SpeciesDto = decode(ensure_success(response, "species")?, "species").await?;

        pokemon
            .into_details(&species, &self.config.language)
            .map(Some)
            .map_err(Error::decode)
    }

    fn pokemon_url(&self, name: &str) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::invalid_url(format!("{} cannot be a base", self.config.base_url)))?
            .pop_if_empty()
            .push("pokemon")
            .push(name);
        Ok(url)
    }
}

#[async_trait]
impl PokemonLookup for PokeApiService {
    async fn lookup(&self, name: &str) -> LookupOutcome {
        tracing::info!(%name, "Looking up pokemon");

        match self.fetch_details(name).await {
            Ok(Some(details)) => LookupOutcome::Found(details),
            Ok(None) => {
                tracing::debug!(%name, "Pokemon not found upstream");
                LookupOutcome::NotFound
            }
            Err(err) => {
                tracing::error!(%name, error = %err, "Pokemon lookup failed");
                LookupOutcome::UpstreamFailure(FETCH_FAILED.to_string())
            }
        }
    }
}

fn ensure_success(response: Response, resource: &'static str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::status(resource, status.as_u16()))
    }
}

async fn decode<T: DeserializeOwned>(response: Response, resource: &str) -> Result<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| Error::decode(format!("invalid {} payload: {}", resource, e)))
}
