use crate::domain::errors::ServiceError;
use crate::transport::http::types::ErrorResponse;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

/// Translates a service error into its HTTP status and body.
///
/// Store and lookup failures are logged and reported as a bare 500.
pub fn service_error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Validation(errors) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.fields().to_vec()),
            },
        ),
        ServiceError::Unprocessable(_) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorResponse::new("Invalid pokemon name by PokeAPI"),
        ),
        ServiceError::Conflict(_) => error_response(
            StatusCode::CONFLICT,
            ErrorResponse::new("Pokemon already exists"),
        ),
        ServiceError::NotFound(_) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::new("Resource not found"),
        ),
        other @ (ServiceError::Repository(_) | ServiceError::Lookup(_)) => {
            tracing::error!(error = %other, "Unhandled service error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal Server Error"),
            )
        }
    }
}

pub fn json_400(err: JsonRejection) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        ErrorResponse::new(format!("Invalid JSON body: {}", err)),
    )
}

pub fn path_400(err: PathRejection) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        ErrorResponse::new(format!("Invalid id: {}", err)),
    )
}
