//! pokedex-gateway - a small HTTP facade over PokeAPI
//!
//! One route, `GET /pokemon-details/:name`, joins the pokemon and species
//! resources into a single simplified payload:
//! - Networked lookup over a shared keep-alive pool ([`upstream::UpstreamPool`])
//! - Lookup injected into the router behind [`lookup::PokemonLookup`]
//! - Configuration from file + environment

pub mod api;
pub mod config;
pub mod error;
pub mod lookup;
pub mod types;
pub mod upstream;

pub use error::{Error, Result};
