// HTTP handlers for note endpoints
// Every handler runs behind `require_auth` and scopes store access to the caller

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::auth::middleware::AuthenticatedUser;
use crate::error::{ApiError, MessageResponse, StoreContext};
use crate::notes::models::{CreateNoteRequest, Note, UpdateNoteRequest};
use crate::AppState;

/// Handler for GET /notes
/// Lists the caller's notes
#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "Notes owned by the caller", body = Vec<Note>),
        (status = 401, description = "Missing or rejected token", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notes"
)]
pub async fn list_notes_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state
        .notes
        .list_for_owner(user.user_id)
        .await
        .store_context("Erro ao recuperar notas")?;

    tracing::debug!("Retrieved {} notes for user {}", notes.len(), user.user_id);
    Ok(Json(notes))
}

/// Handler for GET /notes/{id}
/// A note owned by someone else is reported as not found
#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(("id" = i32, Path, description = "Note id")),
    responses(
        (status = 200, description = "Note found", body = Note),
        (status = 404, description = "No such note for this user"),
        (status = 401, description = "Missing or rejected token", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notes"
)]
pub async fn get_note_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Note>, ApiError> {
    let Path(id) = id?;

    let note = state
        .notes
        .find_for_owner(id, user.user_id)
        .await
        .store_context("Erro ao recuperar notas")?
        .ok_or(ApiError::NotFound { resource: "Note", id })?;

    Ok(Json(note))
}

/// Handler for POST /notes
#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = MessageResponse,
            example = json!({"message": "Nota adicionada com sucesso."})),
        (status = 400, description = "Missing note text", body = MessageResponse,
            example = json!({"message": "Campo [note] é obrigatório."})),
        (status = 401, description = "Missing or rejected token", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notes"
)]
pub async fn create_note_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload?;
    let text = request.into_text()?;

    let note = state
        .notes
        .create(user.user_id, &text)
        .await
        .store_context("Erro ao cadastrar nota")?;

    tracing::info!("Created note {} for user {}", note.id, user.user_id);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Nota adicionada com sucesso.")),
    ))
}

/// Handler for PUT /notes/{id}
/// A write that matches no owned row is a 500, not a 404
#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(("id" = i32, Path, description = "Note id")),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated", body = MessageResponse,
            example = json!({"message": "Atualizado com sucesso."})),
        (status = 400, description = "Missing completed flag", body = MessageResponse,
            example = json!({"message": "Campo [completed] é obrigatório."})),
        (status = 401, description = "Missing or rejected token", body = MessageResponse),
        (status = 500, description = "No owned note matched, or store error", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notes"
)]
pub async fn update_note_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let completed = request.completed()?;

    let updated = state
        .notes
        .set_completed(id, user.user_id, completed)
        .await
        .store_context("Não foi possível atualizar a nota")?;

    if updated == 0 {
        tracing::debug!("Note {} not updated for user {}", id, user.user_id);
        return Err(ApiError::NoRowsAffected("Não foi possível atualizar a nota."));
    }

    tracing::info!("Updated note {} for user {}", id, user.user_id);
    Ok(Json(MessageResponse::new("Atualizado com sucesso.")))
}

/// Handler for DELETE /notes/{id}
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(("id" = i32, Path, description = "Note id")),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 401, description = "Missing or rejected token", body = MessageResponse),
        (status = 500, description = "No owned note matched, or store error", body = MessageResponse,
            example = json!({"message": "Não foi possível excluir a nota"}))
    ),
    security(("bearer_auth" = [])),
    tag = "notes"
)]
pub async fn delete_note_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;

    let deleted = state
        .notes
        .delete_for_owner(id, user.user_id)
        .await
        .store_context("Não foi possível excluir a nota")?;

    if deleted == 0 {
        tracing::debug!("Note {} not deleted for user {}", id, user.user_id);
        return Err(ApiError::NoRowsAffected("Não foi possível excluir a nota"));
    }

    tracing::info!("Deleted note {} for user {}", id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
