//! In-process stand-ins for the `PostgreSQL` repository.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use http_body_util::BodyExt;
use notes_api::{
    models::Note,
    repository::{NoteRepository, RepositoryError},
    router,
    service::NoteService,
};
use tower::ServiceExt;

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
    time::Duration,
};

/// Keeps notes in a map, assigning ids and timestamps the way the
/// `notes` table does.
#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    notes: BTreeMap<i64, Note>,
}

#[async_trait]
impl NoteRepository for MemoryRepository {
    async fn create_note(&self, title: String, content: String) -> Result<Note, RepositoryError> {
        let mut state = self.state.lock().expect("state lock");
        state.last_id += 1;
        let now = Utc::now();
        let note = Note {
            id: state.last_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        };
        state.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>, RepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.notes.values().cloned().collect())
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.notes.get(&id).cloned())
    }

    async fn update_note(
        &self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().expect("state lock");
        match state.notes.get_mut(&id) {
            Some(note) => {
                note.title = title;
                note.content = content;
                note.updated_at = Utc::now().max(note.created_at);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_note(&self, id: i64) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().expect("state lock");
        Ok(u64::from(state.notes.remove(&id).is_some()))
    }
}

/// How a [`BrokenRepository`] fails every call.
#[derive(Clone, Copy)]
pub enum Failure {
    Unreachable,
    Hang,
}

pub struct BrokenRepository(pub Failure);

impl BrokenRepository {
    async fn fail<T>(&self) -> Result<T, RepositoryError> {
        if let Failure::Hang = self.0 {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Err(RepositoryError::Connection(
            "connection refused (os error 111)".to_string(),
        ))
    }
}

#[async_trait]
impl NoteRepository for BrokenRepository {
    async fn create_note(&self, _title: String, _content: String) -> Result<Note, RepositoryError> {
        self.fail().await
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>, RepositoryError> {
        self.fail().await
    }

    async fn get_one_note(&self, _id: i64) -> Result<Option<Note>, RepositoryError> {
        self.fail().await
    }

    async fn update_note(
        &self,
        _id: i64,
        _title: String,
        _content: String,
    ) -> Result<u64, RepositoryError> {
        self.fail().await
    }

    async fn delete_note(&self, _id: i64) -> Result<u64, RepositoryError> {
        self.fail().await
    }
}

pub fn app_with_timeout(repo: impl NoteRepository + 'static, timeout: Duration) -> Router {
    router(Arc::new(NoteService::new(Arc::new(repo), timeout)))
}

pub fn app() -> Router {
    app_with_timeout(MemoryRepository::default(), Duration::from_secs(5))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_str(&self.body).expect("response body should be valid JSON")
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();

    TestResponse {
        status,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
