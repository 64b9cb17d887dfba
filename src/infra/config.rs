//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://pokedex.db?mode=rwc";
pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Sqlite,
    Memory,
}

/// Database URL. Defaults to a `pokedex.db` file in the working directory.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// `STORAGE=memory` keeps records in process (nothing survives a restart).
pub fn storage_kind() -> anyhow::Result<StorageKind> {
    match std::env::var("STORAGE") {
        Err(_) => Ok(StorageKind::Sqlite),
        Ok(v) => match v.trim().to_lowercase().as_str() {
            "" | "sqlite" => Ok(StorageKind::Sqlite),
            "memory" => Ok(StorageKind::Memory),
            other => anyhow::bail!("STORAGE must be `sqlite` or `memory`, got `{}`", other),
        },
    }
}

pub fn pokeapi_base_url() -> String {
    std::env::var("POKEAPI_BASE_URL")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_POKEAPI_BASE_URL.to_string())
}

pub fn pokeapi_timeout() -> anyhow::Result<Duration> {
    let secs = match std::env::var("POKEAPI_TIMEOUT_SECS") {
        Ok(v) => v
            .parse::<u64>()
            .context("POKEAPI_TIMEOUT_SECS must be a valid u64")?,
        Err(_) => 10,
    };
    Ok(Duration::from_secs(secs.max(1)))
}

/// Listen address built from `BIND_HOST` (default `0.0.0.0`) and `PORT` (default 3000).
pub fn bind_addr() -> anyhow::Result<String> {
    let host = std::env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("PORT") {
        Ok(v) => v.parse::<u16>().context("PORT must be a valid u16")?,
        Err(_) => 3000,
    };
    Ok(format!("{}:{}", host, port))
}

/// Allowed CORS origin. `None` allows any origin.
pub fn cors_allow_origin() -> Option<String> {
    std::env::var("CORS_ALLOW_ORIGIN")
        .ok()
        .filter(|v| !v.trim().is_empty())
}
