use crate::dtos::{OpenSessionRequest, SessionResponse};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use metrics::counter;
use service_core::error::AppError;
use validator::Validate;

/// Access gate. The code is not checked against anything: a well-formed
/// code is forwarded verbatim as the session key, and an empty library is
/// created for it on first use.
pub async fn open_session(
    State(state): State<AppState>,
    Json(request): Json<OpenSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.access_code.trim().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Please enter your access code"
        )));
    }
    request.validate()?;

    let document_count = state.db.open_session(&request.access_code);
    counter!("library_sessions_opened_total").increment(1);
    tracing::info!(document_count, "Library session opened");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_key: request.access_code,
            document_count,
        }),
    ))
}

/// Logout. Drops the session's collection and releases its blobs; the
/// library is gone until the code is presented again.
pub async fn close_session(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let storage_keys = state.db.close_session(&key);
    for storage_key in &storage_keys {
        state.storage.delete(storage_key).await?;
    }

    tracing::info!(
        documents_dropped = storage_keys.len(),
        "Library session closed"
    );

    Ok(StatusCode::NO_CONTENT)
}
