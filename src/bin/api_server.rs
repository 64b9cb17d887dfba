// src/bin/api_server.rs

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use pokedex_service::infra::config::{self, StorageKind};
use pokedex_service::transport;
use pokedex_service::{
    InMemoryPokemonRepository, PokeApiClient, PokemonRepository, PokemonService,
    SqlitePokemonRepository,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_service=info,api_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Store Initialization ---
    let repo: Arc<dyn PokemonRepository> = match config::storage_kind()? {
        StorageKind::Sqlite => {
            let url = config::database_url();
            info!("Opening SQLite store at {}", url);
            Arc::new(
                SqlitePokemonRepository::connect(&url)
                    .await
                    .with_context(|| format!("failed to open {}", url))?,
            )
        }
        StorageKind::Memory => {
            info!("Using in-memory store (records are lost on restart)");
            Arc::new(InMemoryPokemonRepository::new())
        }
    };

    // --- Lookup Gateway Initialization ---
    let pokeapi = PokeApiClient::from_env()?;
    info!("PokeAPI base URL: {}", pokeapi.base_url());

    let app_state = transport::http::AppState::new(PokemonService::new(repo, Arc::new(pokeapi)));

    // --- API Server Initialization ---
    let allow_origin = match config::cors_allow_origin() {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(&origin).context("CORS_ALLOW_ORIGIN is not a valid header value")?,
        ),
        None => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config::bind_addr()?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received (Ctrl+C)");
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
