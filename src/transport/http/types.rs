use crate::app::pokemon_service::PokemonService;
use crate::domain::pokemon::FieldError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: PokemonService,
}

impl AppState {
    pub fn new(service: PokemonService) -> Self {
        Self { service }
    }
}

/// Body accepted by `POST /pokemons`.
///
/// Only `name` and `types` are required. The other fields are used when
/// PokeAPI has no value for them.
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct CreatePokemonRequest {
    #[schema(example = "pikachu")]
    pub name: String,
    #[schema(example = json!(["electric"]))]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 4)]
    pub height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 60)]
    pub weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = json!(["static"]))]
    pub abilities: Option<Vec<String>>,
}

/// Body accepted by `PATCH /pokemons/{id}`. Omitted keys keep their stored value.
///
/// Changing `name` re-runs the PokeAPI lookup; fields sent alongside it win
/// over the looked-up values.
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct UpdatePokemonRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<String>>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid pokemon name by PokeAPI")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
