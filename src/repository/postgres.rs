use async_trait::async_trait;
use deadpool_postgres::{
    Config as PgConfig, ManagerConfig, Object, Pool, PoolConfig, RecyclingMethod, Runtime,
    Timeouts,
};
use tokio_postgres::{NoTls, Row};

use std::time::Duration;

use super::{NoteRepository, RepositoryError};
use crate::{
    config::{ConfigError, DatabaseConfig},
    models::Note,
};

pub struct PgRepository {
    pool: Pool,
}

impl PgRepository {
    /// Builds the connection pool. No connection is opened until first use.
    pub fn new(database: &DatabaseConfig, acquire_timeout: Duration) -> Result<Self, ConfigError> {
        let mut timeouts = Timeouts::default();
        timeouts.wait = Some(acquire_timeout);
        timeouts.create = Some(acquire_timeout);
        timeouts.recycle = Some(acquire_timeout);

        let mut pool_config = PoolConfig::new(database.pool_max_size);
        pool_config.timeouts = timeouts;

        let mut cfg = PgConfig::new();
        cfg.url = Some(database.url.clone());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        cfg.pool = Some(pool_config);

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ConfigError::Database(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Opens one connection and runs a trivial statement on it.
    pub async fn check_connection(&self) -> Result<(), RepositoryError> {
        let client = self.client().await?;
        client.execute("SELECT 1", &[]).await?;
        Ok(())
    }

    async fn client(&self) -> Result<Object, RepositoryError> {
        self.pool.get().await.map_err(Into::into)
    }
}

fn note_from_row(row: &Row) -> Result<Note, tokio_postgres::Error> {
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl NoteRepository for PgRepository {
    async fn create_note(&self, title: String, content: String) -> Result<Note, RepositoryError> {
        let client = self.client().await?;
        let row = client
            .query_one(
                "INSERT INTO notes (title, content) VALUES ($1, $2) \
                 RETURNING id, title, content, created_at, updated_at",
                &[&title, &content],
            )
            .await?;

        Ok(note_from_row(&row)?)
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>, RepositoryError> {
        let client = self.client().await?;
        let rows = client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes ORDER BY id ASC",
                &[],
            )
            .await?;

        let notes = rows
            .iter()
            .map(note_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        let client = self.client().await?;
        let row = client
            .query_opt(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row).transpose()?)
    }

    async fn update_note(
        &self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<u64, RepositoryError> {
        let client = self.client().await?;
        let rows = client
            .execute(
                "UPDATE notes SET title = $1, content = $2, updated_at = NOW() WHERE id = $3",
                &[&title, &content, &id],
            )
            .await?;

        Ok(rows)
    }

    async fn delete_note(&self, id: i64) -> Result<u64, RepositoryError> {
        let client = self.client().await?;
        let rows = client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows)
    }
}
