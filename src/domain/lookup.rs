//! Contract for the external source of canonical pokemon data.

use async_trait::async_trait;
use thiserror::Error;

/// Canonical attributes returned by the external source.
///
/// Empty `types`/`abilities` mean the source had no opinion on that field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPokemon {
    pub canonical_name: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
}

/// Failures talking to the external source. An unknown name is not an error.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Lookup API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Could not decode lookup response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait PokemonLookup: Send + Sync {
    /// Returns `Ok(None)` when the source does not know `name`.
    async fn fetch_by_name(&self, name: &str) -> Result<Option<ExternalPokemon>, LookupError>;
}
