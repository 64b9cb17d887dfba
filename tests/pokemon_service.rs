//! Write-path enrichment rules of `PokemonService`, exercised against in-process fakes.

mod common;

use async_trait::async_trait;
use common::{pikachu, raichu, stored_pikachu, strings, FixtureLookup, RecordingRepository};
use pokedex_service::domain::pokemon::{NewPokemon, Pokemon, PokemonChanges};
use pokedex_service::storage::{PokemonRepository, RepositoryError};
use pokedex_service::{ExternalPokemon, PokemonService, ServiceError};
use serde_json::json;
use std::sync::Arc;

fn service(repo: &Arc<RecordingRepository>, lookup: &Arc<FixtureLookup>) -> PokemonService {
    PokemonService::new(repo.clone(), lookup.clone())
}

#[tokio::test]
async fn create_enriches_from_pokeapi() {
    let repo = Arc::new(RecordingRepository::default());
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    let created = svc
        .create(&json!({ "name": "pikachu", "types": ["electric"] }))
        .await
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.name, "pikachu");
    assert_eq!(created.types, strings(&["electric"]));
    assert_eq!(created.abilities, strings(&["static"]));
    assert_eq!(created.height, Some(4));
    assert_eq!(created.weight, Some(60));
    assert_eq!(repo.created().len(), 1);
}

#[tokio::test]
async fn create_uses_canonical_name_and_external_values_over_payload() {
    let repo = Arc::new(RecordingRepository::default());
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    let created = svc
        .create(&json!({
            "name": "PiKaChU",
            "types": ["mouse"],
            "height": 99,
            "abilities": ["custom"]
        }))
        .await
        .unwrap();

    assert_eq!(created.name, "pikachu");
    assert_eq!(created.types, strings(&["electric"]));
    assert_eq!(created.abilities, strings(&["static"]));
    assert_eq!(created.height, Some(4));
}

#[tokio::test]
async fn create_falls_back_to_payload_when_source_has_no_opinion() {
    let sparse = ExternalPokemon {
        canonical_name: "missingno".into(),
        types: vec![],
        abilities: vec![],
        height: None,
        weight: Some(10),
    };
    let repo = Arc::new(RecordingRepository::default());
    let lookup = Arc::new(FixtureLookup::new(vec![sparse]));
    let svc = service(&repo, &lookup);

    let created = svc
        .create(&json!({
            "name": "missingno",
            "types": ["bird", "normal"],
            "height": 3,
            "weight": 1,
            "abilities": ["glitch"]
        }))
        .await
        .unwrap();

    assert_eq!(created.types, strings(&["bird", "normal"]));
    assert_eq!(created.abilities, strings(&["glitch"]));
    assert_eq!(created.height, Some(3));
    assert_eq!(created.weight, Some(10));
}

#[tokio::test]
async fn create_always_persists_an_abilities_list() {
    let no_abilities = ExternalPokemon {
        canonical_name: "ditto".into(),
        types: strings(&["normal"]),
        abilities: vec![],
        height: None,
        weight: None,
    };
    let repo = Arc::new(RecordingRepository::default());
    let lookup = Arc::new(FixtureLookup::new(vec![no_abilities]));
    let svc = service(&repo, &lookup);

    let created = svc
        .create(&json!({ "name": "ditto", "types": ["normal"] }))
        .await
        .unwrap();

    assert!(created.abilities.is_empty());
    assert_eq!(created.height, None);
    assert_eq!(
        repo.created(),
        vec![NewPokemon {
            name: "ditto".into(),
            types: strings(&["normal"]),
            height: None,
            weight: None,
            abilities: vec![],
        }]
    );
}

#[tokio::test]
async fn create_rejects_unknown_names_as_unprocessable() {
    let repo = Arc::new(RecordingRepository::default());
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    for types in [json!(["fire"]), json!(["water", "ice"]), json!(["a", "b", "c"])] {
        let err = svc
            .create(&json!({ "name": "desconhecido", "types": types }))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unprocessable(ref n) if n == "desconhecido"));
    }
    assert!(repo.created().is_empty());
}

#[tokio::test]
async fn create_conflicts_on_existing_canonical_name_regardless_of_case() {
    let repo = Arc::new(RecordingRepository::seeded(vec![stored_pikachu()]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    let err = svc
        .create(&json!({ "name": "PIKACHU", "types": ["electric"] }))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(ref n) if n == "pikachu"));
    assert!(repo.created().is_empty());
}

#[tokio::test]
async fn create_validation_failure_never_reaches_collaborators() {
    let repo = Arc::new(RecordingRepository::default());
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    let err = svc
        .create(&json!({ "name": "pikachu", "types": [], "height": -1 }))
        .await
        .unwrap_err();

    match err {
        ServiceError::Validation(errors) => {
            assert!(errors.contains("types"));
            assert!(errors.contains("height"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(lookup.calls(), 0);
    assert!(repo.created().is_empty());
}

/// Store whose name pre-check never sees the competing writer.
struct RacingRepository;

#[async_trait]
impl PokemonRepository for RacingRepository {
    async fn create(&self, data: NewPokemon) -> Result<Pokemon, RepositoryError> {
        Err(RepositoryError::NameTaken(data.name))
    }
    async fn find_all(&self) -> Result<Vec<Pokemon>, RepositoryError> {
        Ok(vec![])
    }
    async fn find_by_id(&self, _id: i64) -> Result<Option<Pokemon>, RepositoryError> {
        Ok(None)
    }
    async fn find_by_name(&self, _name: &str) -> Result<Option<Pokemon>, RepositoryError> {
        Ok(None)
    }
    async fn update(&self, id: i64, _changes: PokemonChanges) -> Result<Pokemon, RepositoryError> {
        Err(RepositoryError::NotFound(id))
    }
    async fn delete(&self, _id: i64) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[tokio::test]
async fn create_treats_store_uniqueness_violation_as_conflict() {
    let svc = PokemonService::new(
        Arc::new(RacingRepository),
        Arc::new(FixtureLookup::new(vec![pikachu()])),
    );

    let err = svc
        .create(&json!({ "name": "pikachu", "types": ["electric"] }))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn lookup_transport_failures_propagate_unchanged() {
    let repo = Arc::new(RecordingRepository::default());
    let lookup = Arc::new(FixtureLookup::failing());
    let svc = service(&repo, &lookup);

    let err = svc
        .create(&json!({ "name": "pikachu", "types": ["electric"] }))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Lookup(_)));
    assert!(repo.created().is_empty());
}

#[tokio::test]
async fn get_returns_stored_record_without_enrichment() {
    let repo = Arc::new(RecordingRepository::seeded(vec![stored_pikachu()]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    let first = svc.get(1).await.unwrap();
    let second = svc.get(1).await.unwrap();

    assert_eq!(first, stored_pikachu());
    assert_eq!(first, second);
    assert_eq!(lookup.calls(), 0);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let repo = Arc::new(RecordingRepository::default());
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    let err = svc.get(123).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(123)));
    assert_eq!(lookup.calls(), 0);
}

#[tokio::test]
async fn list_passes_through_store_order() {
    let mut bulbasaur = stored_pikachu();
    bulbasaur.id = 2;
    bulbasaur.name = "bulbasaur".into();
    let repo = Arc::new(RecordingRepository::seeded(vec![bulbasaur, stored_pikachu()]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![]));
    let svc = service(&repo, &lookup);

    let names: Vec<String> = svc.list().await.unwrap().into_iter().map(|p| p.name).collect();

    assert_eq!(names, strings(&["pikachu", "bulbasaur"]));
}

#[tokio::test]
async fn update_rename_adopts_external_values() {
    let repo = Arc::new(RecordingRepository::seeded(vec![stored_pikachu()]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![raichu()]));
    let svc = service(&repo, &lookup);

    let updated = svc.update(1, &json!({ "name": "Raichu" })).await.unwrap();

    assert_eq!(
        repo.updates(),
        vec![(
            1,
            PokemonChanges {
                name: Some("raichu".into()),
                types: Some(strings(&["electric"])),
                height: Some(8),
                weight: Some(300),
                abilities: Some(strings(&["static", "lightning-rod"])),
            }
        )]
    );
    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "raichu");
}

#[tokio::test]
async fn update_explicit_fields_override_external_values() {
    let repo = Arc::new(RecordingRepository::seeded(vec![stored_pikachu()]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![raichu()]));
    let svc = service(&repo, &lookup);

    svc.update(
        1,
        &json!({
            "name": "Raichu",
            "types": ["electric", "speed"],
            "abilities": ["custom"],
            "height": 10
        }),
    )
    .await
    .unwrap();

    let (_, changes) = repo.updates().remove(0);
    assert_eq!(changes.name.as_deref(), Some("raichu"));
    assert_eq!(changes.types, Some(strings(&["electric", "speed"])));
    assert_eq!(changes.abilities, Some(strings(&["custom"])));
    assert_eq!(changes.height, Some(10));
    assert_eq!(changes.weight, Some(300));
}

#[tokio::test]
async fn update_without_name_skips_lookup_and_keeps_other_fields() {
    let mut current = stored_pikachu();
    current.abilities = strings(&["static"]);
    current.height = Some(4);
    let repo = Arc::new(RecordingRepository::seeded(vec![current]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    let updated = svc.update(1, &json!({ "weight": 61 })).await.unwrap();

    assert_eq!(lookup.calls(), 0);
    assert_eq!(
        repo.updates(),
        vec![(
            1,
            PokemonChanges {
                weight: Some(61),
                ..Default::default()
            }
        )]
    );
    assert_eq!(updated.weight, Some(61));
    assert_eq!(updated.height, Some(4));
    assert_eq!(updated.abilities, strings(&["static"]));
}

#[tokio::test]
async fn update_with_empty_abilities_clears_them_even_on_rename() {
    let repo = Arc::new(RecordingRepository::seeded(vec![stored_pikachu()]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![raichu()]));
    let svc = service(&repo, &lookup);

    let updated = svc
        .update(1, &json!({ "name": "raichu", "abilities": [] }))
        .await
        .unwrap();

    assert!(updated.abilities.is_empty());
    assert_eq!(updated.height, Some(8));
}

#[tokio::test]
async fn update_rename_to_sparse_source_keeps_stored_fields() {
    let mut current = stored_pikachu();
    current.abilities = strings(&["static"]);
    current.height = Some(4);
    let sparse = ExternalPokemon {
        canonical_name: "pichu".into(),
        types: vec![],
        abilities: vec![],
        height: None,
        weight: Some(20),
    };
    let repo = Arc::new(RecordingRepository::seeded(vec![current]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![sparse]));
    let svc = service(&repo, &lookup);

    let updated = svc.update(1, &json!({ "name": "Pichu" })).await.unwrap();

    assert_eq!(
        repo.updates(),
        vec![(
            1,
            PokemonChanges {
                name: Some("pichu".into()),
                weight: Some(20),
                ..Default::default()
            }
        )]
    );
    assert_eq!(updated.name, "pichu");
    assert_eq!(updated.types, strings(&["electric"]));
    assert_eq!(updated.abilities, strings(&["static"]));
    assert_eq!(updated.height, Some(4));
    assert_eq!(updated.weight, Some(20));
}

#[tokio::test]
async fn update_unknown_id_is_not_found_before_validation() {
    let repo = Arc::new(RecordingRepository::default());
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    let err = svc
        .update(1, &json!({ "name": "x", "types": "not-a-list" }))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(1)));
    assert_eq!(lookup.calls(), 0);
    assert!(repo.updates().is_empty());
}

#[tokio::test]
async fn update_with_unknown_name_is_unprocessable() {
    let repo = Arc::new(RecordingRepository::seeded(vec![stored_pikachu()]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    let err = svc
        .update(1, &json!({ "name": "agumon" }))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Unprocessable(_)));
    assert!(repo.updates().is_empty());
}

#[tokio::test]
async fn update_rename_onto_existing_record_conflicts() {
    let mut raichu_row = stored_pikachu();
    raichu_row.id = 2;
    raichu_row.name = "raichu".into();
    let repo = Arc::new(RecordingRepository::seeded(vec![stored_pikachu(), raichu_row]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![raichu()]));
    let svc = service(&repo, &lookup);

    let err = svc
        .update(1, &json!({ "name": "RAICHU" }))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(ref n) if n == "raichu"));
    assert_eq!(svc.get(1).await.unwrap().name, "pikachu");
}

#[tokio::test]
async fn delete_removes_record_and_unknown_id_is_not_found() {
    let repo = Arc::new(RecordingRepository::seeded(vec![stored_pikachu()]).await);
    let lookup = Arc::new(FixtureLookup::new(vec![pikachu()]));
    let svc = service(&repo, &lookup);

    svc.delete(1).await.unwrap();
    assert_eq!(repo.deletes(), vec![1]);
    assert!(matches!(svc.get(1).await, Err(ServiceError::NotFound(1))));

    let err = svc.delete(1).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(1)));
    assert_eq!(repo.deletes(), vec![1]);
    assert_eq!(lookup.calls(), 0);
}
