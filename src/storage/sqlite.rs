//! SQLite-backed record store.
//!
//! One table, `pokemons`; the list columns (`types`, `abilities`) are stored
//! as JSON-encoded text.

use crate::domain::pokemon::{NewPokemon, Pokemon, PokemonChanges};
use crate::storage::repository::{PokemonRepository, RepositoryError};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::time::Duration;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS pokemons (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    types TEXT NOT NULL,
    height INTEGER,
    weight INTEGER,
    abilities TEXT NOT NULL
)";

const COLUMNS: &str = "id, name, types, height, weight, abilities";

#[derive(Clone)]
pub struct SqlitePokemonRepository {
    pool: SqlitePool,
}

impl SqlitePokemonRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool on `database_url` and makes sure the table exists.
    ///
    /// `sqlite::memory:` databases live and die with their connection, so they
    /// get a single connection that is never recycled.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = options.connect(database_url).await?;
        let repo = Self::new(pool);
        repo.ensure_schema().await?;
        Ok(repo)
    }

    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_pokemon(row: &SqliteRow) -> Result<Pokemon, RepositoryError> {
    let types: String = row.try_get("types")?;
    let abilities: String = row.try_get("abilities")?;
    Ok(Pokemon {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        types: serde_json::from_str(&types)?,
        height: row.try_get("height")?,
        weight: row.try_get("weight")?,
        abilities: serde_json::from_str(&abilities)?,
    })
}

/// Maps UNIQUE(name) violations to `NameTaken`, everything else stays a database error.
fn map_write_error(e: sqlx::Error, name: &str) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::NameTaken(name.to_string())
        }
        _ => RepositoryError::Database(e),
    }
}

#[async_trait]
impl PokemonRepository for SqlitePokemonRepository {
    async fn create(&self, data: NewPokemon) -> Result<Pokemon, RepositoryError> {
        let sql = format!(
            "INSERT INTO pokemons (name, types, height, weight, abilities)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&data.name)
            .bind(serde_json::to_string(&data.types)?)
            .bind(data.height)
            .bind(data.weight)
            .bind(serde_json::to_string(&data.abilities)?)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &data.name))?;
        row_to_pokemon(&row)
    }

    async fn find_all(&self) -> Result<Vec<Pokemon>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM pokemons ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_pokemon).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Pokemon>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM pokemons WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_pokemon).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Pokemon>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM pokemons WHERE name = ?");
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_pokemon).transpose()
    }

    async fn update(&self, id: i64, changes: PokemonChanges) -> Result<Pokemon, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {COLUMNS} FROM pokemons WHERE id = ?");
        let current = match sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        {
            Some(row) => row_to_pokemon(&row)?,
            None => return Err(RepositoryError::NotFound(id)),
        };

        let merged = changes.apply_to(&current);
        sqlx::query(
            "UPDATE pokemons
             SET name = ?, types = ?, height = ?, weight = ?, abilities = ?
             WHERE id = ?",
        )
        .bind(&merged.name)
        .bind(serde_json::to_string(&merged.types)?)
        .bind(merged.height)
        .bind(merged.weight)
        .bind(serde_json::to_string(&merged.abilities)?)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &merged.name))?;

        tx.commit().await?;
        Ok(merged)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM pokemons WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
