use crate::domain::pokemon::{FieldError, Pokemon};
use crate::transport::http::handlers::{form, health, pokemons};
use crate::transport::http::types::{
    CreatePokemonRequest, ErrorResponse, HealthResponse, UpdatePokemonRequest,
};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Pokedex API", version = "1.0.0"),
    paths(
        health::healthcheck_handler,
        pokemons::list_pokemons_handler,
        pokemons::create_pokemon_handler,
        pokemons::get_pokemon_handler,
        pokemons::update_pokemon_handler,
        pokemons::delete_pokemon_handler
    ),
    components(schemas(
        Pokemon,
        CreatePokemonRequest,
        UpdatePokemonRequest,
        ErrorResponse,
        FieldError,
        HealthResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/", get(form::index_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/pokemons",
            get(pokemons::list_pokemons_handler).post(pokemons::create_pokemon_handler),
        )
        .route(
            "/pokemons/:id",
            get(pokemons::get_pokemon_handler)
                .patch(pokemons::update_pokemon_handler)
                .delete(pokemons::delete_pokemon_handler),
        )
        .with_state(app_state)
}
