use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    error::AppError,
    repository::{NoteRepository, RepositoryError},
};

use std::{future::Future, sync::Arc, time::Duration};

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
    request_timeout: Duration,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>, request_timeout: Duration) -> Self {
        Self {
            repo,
            request_timeout,
        }
    }

    // Dropping the timed-out future releases its pooled connection.
    async fn with_deadline<T>(
        &self,
        operation: impl Future<Output = Result<T, RepositoryError>> + Send,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.request_timeout, operation)
            .await
            .map_err(|_| AppError::Timeout(self.request_timeout))?
            .map_err(AppError::from)
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<NoteResponse, AppError> {
        let note = self
            .with_deadline(self.repo.create_note(request.title, request.content))
            .await?;

        tracing::info!("created note {}", note.id);
        Ok(note.into())
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, AppError> {
        let notes = self.with_deadline(self.repo.get_all_notes()).await?;

        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn get_one_note(&self, id: i64) -> Result<NoteResponse, AppError> {
        self.with_deadline(self.repo.get_one_note(id))
            .await?
            .map(NoteResponse::from)
            .ok_or(AppError::NotFound(id))
    }

    pub async fn update_note(&self, id: i64, request: UpdateNoteRequest) -> Result<(), AppError> {
        let rows = self
            .with_deadline(self.repo.update_note(id, request.title, request.content))
            .await?;

        expect_single_row(id, rows)?;
        tracing::info!("updated note {id}");
        Ok(())
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), AppError> {
        let rows = self.with_deadline(self.repo.delete_note(id)).await?;

        expect_single_row(id, rows)?;
        tracing::info!("deleted note {id}");
        Ok(())
    }
}

/// Ids are unique, so anything but exactly one affected row means the note
/// was not there.
fn expect_single_row(id: i64, rows: u64) -> Result<(), AppError> {
    match rows {
        1 => Ok(()),
        0 => Err(AppError::NotFound(id)),
        n => {
            tracing::warn!("statement on note {id} affected {n} rows");
            Err(AppError::NotFound(id))
        }
    }
}
