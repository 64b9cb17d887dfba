//! PokeAPI v2 client implementing the `PokemonLookup` contract.

use crate::domain::lookup::{ExternalPokemon, LookupError, PokemonLookup};
use crate::infra::config;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("pokedex-service/", env!("CARGO_PKG_VERSION"));

// Only the parts of `/pokemon/{name}` we map.
#[derive(Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    #[serde(default)]
    types: Vec<TypeSlot>,
    height: Option<i64>,
    weight: Option<i64>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

impl From<PokemonResponse> for ExternalPokemon {
    fn from(r: PokemonResponse) -> Self {
        ExternalPokemon {
            canonical_name: r.name,
            types: r.types.into_iter().map(|t| t.kind.name).collect(),
            abilities: r.abilities.into_iter().map(|a| a.ability.name).collect(),
            height: r.height,
            weight: r.weight,
        }
    }
}

/// Errors building a `PokeApiClient`; surfaced at startup.
#[derive(Debug, Error)]
pub enum PokeApiConfigError {
    #[error("Invalid PokeAPI base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub struct PokeApiClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl PokeApiClient {
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, PokeApiConfigError> {
        let raw = base_url.as_ref();
        let base_url = Url::parse(raw).map_err(|e| PokeApiConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(PokeApiConfigError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Builds a client from `POKEAPI_BASE_URL` / `POKEAPI_TIMEOUT_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(config::pokeapi_base_url(), config::pokeapi_timeout()?)?)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn pokemon_url(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        // `new` only accepts http(s) base URLs, which always have path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("pokemon")
                .push(&name.trim().to_lowercase());
        }
        url
    }
}

#[async_trait]
impl PokemonLookup for PokeApiClient {
    async fn fetch_by_name(&self, name: &str) -> Result<Option<ExternalPokemon>, LookupError> {
        let url = self.pokemon_url(name);
        tracing::debug!(name = %name, url = %url, "Querying PokeAPI");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(name = %name, "PokeAPI does not know this name");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PokemonResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;
        Ok(Some(parsed.into()))
    }
}
