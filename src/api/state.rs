//! API server state

use std::sync::Arc;

use crate::lookup::PokemonLookup;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Lookup used by the details route; a stub in tests
    pub lookup: Arc<dyn PokemonLookup>,
}

impl AppState {
    pub fn new(lookup: Arc<dyn PokemonLookup>) -> Self {
        Self { lookup }
    }
}
