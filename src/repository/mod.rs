mod postgres;

pub use postgres::PgRepository;

use async_trait::async_trait;

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No connection could be obtained: the store is unreachable, rejected
    /// the credentials, or the pool gave up waiting.
    #[error("Failed to connect to the database: {0}")]
    Connection(String),

    #[error("Failed to execute the statement: {0}")]
    Statement(#[from] tokio_postgres::Error),
}

impl From<deadpool_postgres::PoolError> for RepositoryError {
    fn from(e: deadpool_postgres::PoolError) -> Self {
        Self::Connection(e.to_string())
    }
}

/// Storage gateway for the `notes` table. Every method runs exactly one
/// statement on a connection it holds only for the duration of the call.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create_note(&self, title: String, content: String) -> Result<Note, RepositoryError>;

    /// All notes ordered by id ascending.
    async fn get_all_notes(&self) -> Result<Vec<Note>, RepositoryError>;

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, RepositoryError>;

    /// Returns the number of affected rows.
    async fn update_note(
        &self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<u64, RepositoryError>;

    /// Returns the number of affected rows.
    async fn delete_note(&self, id: i64) -> Result<u64, RepositoryError>;
}
