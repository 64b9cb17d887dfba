//! In-process record store with the same semantics as the SQLite one.

use crate::domain::pokemon::{NewPokemon, Pokemon, PokemonChanges};
use crate::storage::repository::{PokemonRepository, RepositoryError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Pokemon>,
    last_id: i64,
}

impl Inner {
    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|p| p.name == name && Some(p.id) != except)
    }
}

#[derive(Default)]
pub struct InMemoryPokemonRepository {
    inner: Mutex<Inner>,
}

impl InMemoryPokemonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record with a fixed id; later inserts continue after the highest id.
    pub async fn insert_raw(&self, pokemon: Pokemon) {
        let mut inner = self.inner.lock().await;
        inner.last_id = inner.last_id.max(pokemon.id);
        inner.rows.insert(pokemon.id, pokemon);
    }
}

#[async_trait]
impl PokemonRepository for InMemoryPokemonRepository {
    async fn create(&self, data: NewPokemon) -> Result<Pokemon, RepositoryError> {
        let mut inner = self.inner.lock().await;
        if inner.name_taken(&data.name, None) {
            return Err(RepositoryError::NameTaken(data.name));
        }
        inner.last_id += 1;
        let pokemon = Pokemon {
            id: inner.last_id,
            name: data.name,
            types: data.types,
            height: data.height,
            weight: data.weight,
            abilities: data.abilities,
        };
        inner.rows.insert(pokemon.id, pokemon.clone());
        Ok(pokemon)
    }

    async fn find_all(&self) -> Result<Vec<Pokemon>, RepositoryError> {
        Ok(self.inner.lock().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Pokemon>, RepositoryError> {
        Ok(self.inner.lock().await.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Pokemon>, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.values().find(|p| p.name == name).cloned())
    }

    async fn update(&self, id: i64, changes: PokemonChanges) -> Result<Pokemon, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let current = inner.rows.get(&id).ok_or(RepositoryError::NotFound(id))?;
        let merged = changes.apply_to(current);
        if inner.name_taken(&merged.name, Some(id)) {
            return Err(RepositoryError::NameTaken(merged.name));
        }
        inner.rows.insert(id, merged.clone());
        Ok(merged)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.inner.lock().await.rows.remove(&id);
        Ok(())
    }
}
