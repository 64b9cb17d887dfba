//! Shared fakes for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use pokedex_service::domain::lookup::LookupError;
use pokedex_service::domain::pokemon::{NewPokemon, Pokemon, PokemonChanges};
use pokedex_service::storage::{InMemoryPokemonRepository, PokemonRepository, RepositoryError};
use pokedex_service::{ExternalPokemon, PokemonLookup};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn pikachu() -> ExternalPokemon {
    ExternalPokemon {
        canonical_name: "pikachu".into(),
        types: strings(&["electric"]),
        abilities: strings(&["static"]),
        height: Some(4),
        weight: Some(60),
    }
}

pub fn raichu() -> ExternalPokemon {
    ExternalPokemon {
        canonical_name: "raichu".into(),
        types: strings(&["electric"]),
        abilities: strings(&["static", "lightning-rod"]),
        height: Some(8),
        weight: Some(300),
    }
}

/// Lookup gateway answering from a fixed table, keyed by lowercased name.
#[derive(Default)]
pub struct FixtureLookup {
    known: HashMap<String, ExternalPokemon>,
    calls: AtomicUsize,
    fail: bool,
}

impl FixtureLookup {
    pub fn new(entries: Vec<ExternalPokemon>) -> Self {
        Self {
            known: entries
                .into_iter()
                .map(|e| (e.canonical_name.to_lowercase(), e))
                .collect(),
            ..Default::default()
        }
    }

    /// Every call fails like an unreachable upstream.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PokemonLookup for FixtureLookup {
    async fn fetch_by_name(&self, name: &str) -> Result<Option<ExternalPokemon>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LookupError::Api {
                status: 503,
                body: "upstream unavailable".into(),
            });
        }
        Ok(self.known.get(&name.to_lowercase()).cloned())
    }
}

/// In-memory store that remembers what the service handed to it.
#[derive(Default)]
pub struct RecordingRepository {
    pub inner: InMemoryPokemonRepository,
    created: Mutex<Vec<NewPokemon>>,
    updates: Mutex<Vec<(i64, PokemonChanges)>>,
    deletes: Mutex<Vec<i64>>,
}

impl RecordingRepository {
    pub async fn seeded(records: Vec<Pokemon>) -> Self {
        let repo = Self::default();
        for r in records {
            repo.inner.insert_raw(r).await;
        }
        repo
    }

    pub fn created(&self) -> Vec<NewPokemon> {
        self.created.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(i64, PokemonChanges)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<i64> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl PokemonRepository for RecordingRepository {
    async fn create(&self, data: NewPokemon) -> Result<Pokemon, RepositoryError> {
        self.created.lock().unwrap().push(data.clone());
        self.inner.create(data).await
    }

    async fn find_all(&self) -> Result<Vec<Pokemon>, RepositoryError> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Pokemon>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Pokemon>, RepositoryError> {
        self.inner.find_by_name(name).await
    }

    async fn update(&self, id: i64, changes: PokemonChanges) -> Result<Pokemon, RepositoryError> {
        self.updates.lock().unwrap().push((id, changes.clone()));
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.deletes.lock().unwrap().push(id);
        self.inner.delete(id).await
    }
}

pub fn stored_pikachu() -> Pokemon {
    Pokemon {
        id: 1,
        name: "pikachu".into(),
        types: strings(&["electric"]),
        height: None,
        weight: None,
        abilities: vec![],
    }
}
