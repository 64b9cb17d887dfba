//! Errors raised by the pokemon service.
//!
//! The service is transport agnostic; status codes are chosen in
//! `transport::http`.

use crate::domain::lookup::LookupError;
use crate::domain::pokemon::ValidationErrors;
use crate::storage::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input; never reaches the store or the lookup gateway.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Syntactically valid name the external source does not recognize.
    #[error("Invalid pokemon name by PokeAPI: {0}")]
    Unprocessable(String),

    /// Canonical name already taken by another record.
    #[error("Pokemon already exists: {0}")]
    Conflict(String),

    #[error("Pokemon {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl From<RepositoryError> for ServiceError {
    fn from(e: RepositoryError) -> Self {
        match e {
            // The store's uniqueness constraint is the final arbiter for concurrent writers.
            RepositoryError::NameTaken(name) => ServiceError::Conflict(name),
            RepositoryError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Repository(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
