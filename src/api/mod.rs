//! HTTP API server

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::lookup::{PokeApiService, PokemonLookup};

pub mod handlers;
pub mod state;

pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/pokemon-details/:name", get(handlers::pokemon_details))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router backed by any lookup implementation
pub fn create_lookup_router(lookup: Arc<dyn PokemonLookup>) -> Router {
    create_router(AppState::new(lookup))
}

/// Router backed by the networked PokeAPI service
pub fn create_pokeapi_router(service: Arc<PokeApiService>) -> Router {
    create_lookup_router(service)
}
