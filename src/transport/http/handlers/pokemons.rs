use crate::transport::http::handlers::common::{json_400, path_400, service_error_response};
use crate::transport::http::types::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/pokemons",
    responses(
        (status = 200, description = "All stored pokemons", body = [crate::domain::pokemon::Pokemon]),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn list_pokemons_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.list().await {
        Ok(all) => (StatusCode::OK, Json(all)).into_response(),
        Err(e) => service_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/pokemons",
    request_body = crate::transport::http::types::CreatePokemonRequest,
    responses(
        (status = 201, description = "Created", body = crate::domain::pokemon::Pokemon),
        (status = 400, description = "Invalid body", body = crate::transport::http::types::ErrorResponse),
        (status = 409, description = "Conflict", body = crate::transport::http::types::ErrorResponse),
        (status = 422, description = "Name not recognized by PokeAPI", body = crate::transport::http::types::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn create_pokemon_handler(
    State(state): State<AppState>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e),
    };

    match state.service.create(&payload).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => service_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/pokemons/{id}",
    params(("id" = i64, Path, description = "Pokemon id")),
    responses(
        (status = 200, description = "OK", body = crate::domain::pokemon::Pokemon),
        (status = 404, description = "Not found", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn get_pokemon_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };

    match state.service.get(id).await {
        Ok(found) => (StatusCode::OK, Json(found)).into_response(),
        Err(e) => service_error_response(e),
    }
}

#[utoipa::path(
    patch,
    path = "/pokemons/{id}",
    params(("id" = i64, Path, description = "Pokemon id")),
    request_body = crate::transport::http::types::UpdatePokemonRequest,
    responses(
        (status = 200, description = "Updated", body = crate::domain::pokemon::Pokemon),
        (status = 400, description = "Invalid body", body = crate::transport::http::types::ErrorResponse),
        (status = 404, description = "Not found", body = crate::transport::http::types::ErrorResponse),
        (status = 409, description = "New name already taken", body = crate::transport::http::types::ErrorResponse),
        (status = 422, description = "Name not recognized by PokeAPI", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn update_pokemon_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    let Json(patch) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e),
    };

    match state.service.update(id, &patch).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => service_error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/pokemons/{id}",
    params(("id" = i64, Path, description = "Pokemon id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn delete_pokemon_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };

    match state.service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => service_error_response(e),
    }
}
