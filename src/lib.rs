//! REST service exposing CRUD operations over notes stored in `PostgreSQL`.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use config::Config;
use error::AppError;
use handlers::rest;
use repository::PgRepository;
use service::NoteService;

/// Creates the pooled store from `config` and verifies it is reachable.
pub async fn build_service(config: &Config) -> Result<NoteService, AppError> {
    let repo = PgRepository::new(&config.database, config.request_timeout)?;
    repo.check_connection().await?;

    tracing::info!(
        "Database pool ready (max {} connections)",
        config.database.pool_max_size
    );

    Ok(NoteService::new(Arc::new(repo), config.request_timeout))
}

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/notes", post(rest::create_note).get(rest::get_all_notes))
        .route(
            "/notes/{id}",
            get(rest::get_one_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        )
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-doc/openapi.json", rest::ApiDoc::openapi()),
        )
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Hello world!").into_response()
}
