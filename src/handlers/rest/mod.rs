use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, MessageResponse, NoteResponse, UpdateNoteRequest},
    error::AppError,
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        get_all_notes,
        get_one_note,
        update_note,
        delete_note
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        MessageResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Internal server error"),
        (status = 504, description = "Database operation timed out")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let note = service.create_note(payload).await?;

    Ok((StatusCode::CREATED, Json(note)).into_response())
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes ordered by id", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error"),
        (status = 504, description = "Database operation timed out")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Result<Response, AppError> {
    let notes = service.get_all_notes().await?;

    Ok((StatusCode::OK, Json(notes)).into_response())
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 400, description = "Malformed note ID"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error"),
        (status = 504, description = "Database operation timed out")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let note = service.get_one_note(id).await?;

    Ok((StatusCode::OK, Json(note)).into_response())
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = MessageResponse),
        (status = 400, description = "Malformed note ID or request body"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error"),
        (status = 504, description = "Database operation timed out")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    service.update_note(id, payload).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Note updated successfully")),
    )
        .into_response())
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 400, description = "Malformed note ID"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error"),
        (status = 504, description = "Database operation timed out")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    service.delete_note(id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Note deleted successfully")),
    )
        .into_response())
}
