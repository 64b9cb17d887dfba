//! The pokemon service.
//!
//! Orchestrates validation, the external lookup and the record store for every
//! write. It owns no state: the store and the lookup gateway are injected and
//! outlive any single call.
//!
//! Field precedence:
//! - create: external value > value from the payload > default
//!   (`abilities` defaults to empty, `types` to the payload's own list).
//! - update: explicit patch value > external value (only when the patch
//!   renames) > stored value.

use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::lookup::{ExternalPokemon, PokemonLookup};
use crate::domain::pokemon::{CreatePokemon, NewPokemon, Pokemon, PokemonChanges, PokemonPatch};
use crate::storage::PokemonRepository;
use serde_json::Value as JsonValue;
use std::sync::Arc;

#[derive(Clone)]
pub struct PokemonService {
    repo: Arc<dyn PokemonRepository>,
    lookup: Arc<dyn PokemonLookup>,
}

impl PokemonService {
    pub fn new(repo: Arc<dyn PokemonRepository>, lookup: Arc<dyn PokemonLookup>) -> Self {
        Self { repo, lookup }
    }

    pub fn repository(&self) -> &Arc<dyn PokemonRepository> {
        &self.repo
    }

    pub async fn create(&self, input: &JsonValue) -> ServiceResult<Pokemon> {
        let input = CreatePokemon::from_payload(input)?;
        let external = self.lookup_known(&input.name).await?;

        if self
            .repo
            .find_by_name(&external.canonical_name)
            .await?
            .is_some()
        {
            tracing::info!(name = %external.canonical_name, "Rejecting duplicate pokemon");
            return Err(ServiceError::Conflict(external.canonical_name));
        }

        let record = merge_for_create(input, external);
        let created = self.repo.create(record).await?;
        tracing::info!(id = created.id, name = %created.name, "Created pokemon");
        Ok(created)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Pokemon>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Pokemon> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn update(&self, id: i64, patch: &JsonValue) -> ServiceResult<Pokemon> {
        // Existence is checked before the patch is validated or looked up.
        self.get(id).await?;
        let patch = PokemonPatch::from_payload(patch)?;

        let external = match patch.name.as_deref() {
            Some(name) => Some(self.lookup_known(name).await?),
            None => None,
        };

        let changes = merge_for_update(patch, external);
        let updated = self.repo.update(id, changes).await?;
        tracing::info!(id = updated.id, name = %updated.name, "Updated pokemon");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.get(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(id, "Deleted pokemon");
        Ok(())
    }

    async fn lookup_known(&self, name: &str) -> ServiceResult<ExternalPokemon> {
        match self.lookup.fetch_by_name(name).await? {
            Some(external) => Ok(external),
            None => {
                tracing::info!(name = %name, "Name not recognized by PokeAPI");
                Err(ServiceError::Unprocessable(name.to_string()))
            }
        }
    }
}

/// Builds the record to insert from validated input and the external result.
pub fn merge_for_create(input: CreatePokemon, external: ExternalPokemon) -> NewPokemon {
    NewPokemon {
        name: external.canonical_name,
        types: non_empty(external.types).unwrap_or(input.types),
        abilities: non_empty(external.abilities)
            .or(input.abilities)
            .unwrap_or_default(),
        height: external.height.or(input.height),
        weight: external.weight.or(input.weight),
    }
}

/// Builds the partial update from a validated patch and, when the patch
/// renames the record, the external result for the new name.
pub fn merge_for_update(patch: PokemonPatch, external: Option<ExternalPokemon>) -> PokemonChanges {
    let mut changes = PokemonChanges::default();

    if let Some(external) = external {
        changes.name = Some(external.canonical_name);
        changes.types = non_empty(external.types);
        changes.abilities = non_empty(external.abilities);
        changes.height = external.height;
        changes.weight = external.weight;
    }

    if patch.types.is_some() {
        changes.types = patch.types;
    }
    if patch.abilities.is_some() {
        changes.abilities = patch.abilities;
    }
    if patch.height.is_some() {
        changes.height = patch.height;
    }
    if patch.weight.is_some() {
        changes.weight = patch.weight;
    }

    changes
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
