//! Core data types

use serde::{Deserialize, Serialize};

/// Description used when the species has no entry in the requested language.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Simplified view of a pokemon, built from the pokemon and species resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetails {
    pub id: u32,
    pub name: String,
    /// First listed type, e.g. "electric"
    #[serde(rename = "type")]
    pub primary_type: String,
    /// Default front sprite; serialized as `null` when the upstream has none
    pub sprite: Option<String>,
    pub description: String,
}

/// Result of a single lookup.
///
/// Absence is a regular outcome rather than an error. Every other failure is
/// collapsed into `UpstreamFailure` with a generic reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(PokemonDetails),
    NotFound,
    UpstreamFailure(String),
}

impl LookupOutcome {
    /// Consume the outcome, returning the details if found
    pub fn into_found(self) -> Option<PokemonDetails> {
        match self {
            LookupOutcome::Found(details) => Some(details),
            _ => None,
        }
    }
}

/// JSON body returned for non-success responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
