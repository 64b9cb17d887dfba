//! Record store contract.

use crate::domain::pokemon::{NewPokemon, Pokemon, PokemonChanges};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// UNIQUE(name) rejected the write.
    #[error("Name already taken: {0}")]
    NameTaken(String),

    #[error("Pokemon {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt stored list column: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistence for pokemon records.
///
/// `update` merges the given changes with the stored row; `delete` of an
/// unknown id is a no-op.
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    async fn create(&self, data: NewPokemon) -> Result<Pokemon, RepositoryError>;

    /// All records, ordered by id.
    async fn find_all(&self) -> Result<Vec<Pokemon>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Pokemon>, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Pokemon>, RepositoryError>;

    async fn update(&self, id: i64, changes: PokemonChanges) -> Result<Pokemon, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Liveness check used by `/health`.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
