use crate::dtos::{
    DocumentListParams, DocumentListResponse, DocumentResponse, PreviewParams, PreviewResponse,
};
use crate::middleware::SessionKey;
use crate::models::{document::is_allowed_mime_type, Document, DEFAULT_CATEGORY};
use crate::services::query::{self, DocumentQuery};
use crate::startup::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics::counter;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

/// Metadata fields accompanying the file part of an upload.
#[derive(Debug, Default, Validate)]
struct UploadForm {
    #[validate(length(min = 1, message = "Title is required"))]
    title: String,
    subject: String,
    description: String,
    category: String,
    tags: Vec<String>,
}

fn require_session(state: &AppState, session: &SessionKey) -> Result<(), AppError> {
    if state.db.session_exists(&session.0) {
        Ok(())
    } else {
        Err(AppError::AuthError(anyhow::anyhow!(
            "No open session for this key"
        )))
    }
}

pub async fn upload_document(
    State(state): State<AppState>,
    session: SessionKey,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    require_session(&state, &session)?;

    let mut form = UploadForm::default();
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("unnamed").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                // Whole file into memory; there is no other storage tier.
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
                })?;
                file = Some((file_name, mime_type, data.to_vec()));
            }
            "title" => form.title = text_field(field).await?,
            "subject" => form.subject = text_field(field).await?,
            "description" => form.description = text_field(field).await?,
            "category" => form.category = text_field(field).await?,
            "tags" => {
                form.tags = text_field(field)
                    .await?
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect();
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    let (file_name, mime_type, data) =
        file.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No file uploaded")))?;

    if !is_allowed_mime_type(&mime_type) {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Unsupported file type {}: upload PDF, Word, or text files only",
            mime_type
        )));
    }

    let size = data.len() as i64;
    if size > state.config.upload.max_file_size {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "File too large (max {} bytes)",
            state.config.upload.max_file_size
        )));
    }

    form.title = form.title.trim().to_string();
    form.validate()?;
    if form.category.trim().is_empty() {
        form.category = DEFAULT_CATEGORY.to_string();
    }

    let extension = std::path::Path::new(&file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");
    let storage_key = format!("{}.{}", Uuid::new_v4(), extension);

    state.storage.upload(&storage_key, data).await.map_err(|e| {
        tracing::error!("Failed to store uploaded file {}: {}", storage_key, e);
        e
    })?;

    let document = Document::new(
        form.title,
        form.subject,
        form.description,
        form.category,
        form.tags,
        file_name,
        mime_type,
        size,
        storage_key,
    );

    tracing::info!(
        document_id = %document.id,
        filename = %document.file_name,
        size = %size,
        "Document upload completed"
    );

    state.db.insert(&session.0, document.clone());
    counter!("library_documents_uploaded_total").increment(1);

    Ok((StatusCode::CREATED, Json(DocumentResponse::from(document))))
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })
}

pub async fn list_documents(
    State(state): State<AppState>,
    session: SessionKey,
    Query(params): Query<DocumentListParams>,
) -> Result<impl IntoResponse, AppError> {
    require_session(&state, &session)?;

    let collection = state.db.list(&session.0);
    // Facets come from the whole collection so filter controls stay stable
    // while a filter is active.
    let categories = query::distinct_categories(&collection);
    let tags = query::distinct_tags(&collection);

    let filtered = query::filter_and_sort(&collection, &DocumentQuery::from(params));

    Ok(Json(DocumentListResponse {
        total: filtered.len(),
        documents: filtered.into_iter().map(DocumentResponse::from).collect(),
        categories,
        tags,
    }))
}

pub async fn get_document(
    State(state): State<AppState>,
    session: SessionKey,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_session(&state, &session)?;

    let document = state
        .db
        .find(&session.0, &document_id)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Document not found")))?;

    Ok(Json(DocumentResponse::from(document)))
}

pub async fn preview_document(
    State(state): State<AppState>,
    session: SessionKey,
    Path(document_id): Path<String>,
    Query(params): Query<PreviewParams>,
) -> Result<impl IntoResponse, AppError> {
    require_session(&state, &session)?;

    let document = state
        .db
        .find(&session.0, &document_id)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Document not found")))?;

    Ok(Json(PreviewResponse::new(document, params.zoom)))
}

pub async fn download_document(
    State(state): State<AppState>,
    session: SessionKey,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_session(&state, &session)?;

    let document = state
        .db
        .find(&session.0, &document_id)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Document not found")))?;

    let data = state
        .storage
        .download(&document.storage_key)
        .await
        .map_err(|e| {
            tracing::error!(
                document_id = %document_id,
                storage_key = %document.storage_key,
                error = %e,
                "Failed to read stored file"
            );
            e
        })?;

    tracing::info!(
        document_id = %document_id,
        content_type = %document.mime_type,
        size = data.len(),
        "Document download completed"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, document.mime_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.file_name),
            ),
        ],
        data,
    ))
}

pub async fn delete_document(
    State(state): State<AppState>,
    session: SessionKey,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_session(&state, &session)?;

    let document = state
        .db
        .remove(&session.0, &document_id)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Document not found")))?;

    state.storage.delete(&document.storage_key).await?;
    counter!("library_documents_deleted_total").increment(1);

    tracing::info!(document_id = %document_id, "Document deleted");

    Ok(StatusCode::NO_CONTENT)
}
