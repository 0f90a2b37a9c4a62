use crate::models::Document;
use crate::services::query::{DocumentQuery, SortKey, SortOrder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_at: String,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            subject: doc.subject,
            description: doc.description,
            category: doc.category,
            tags: doc.tags,
            file_name: doc.file_name,
            file_size: doc.file_size,
            mime_type: doc.mime_type,
            uploaded_at: doc.uploaded_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Comma-separated tag set; a document matches if it carries any of them.
    pub tags: Option<String>,
    pub sort_by: Option<SortKey>,
    pub order: Option<SortOrder>,
}

impl From<DocumentListParams> for DocumentQuery {
    fn from(params: DocumentListParams) -> Self {
        let tags = params
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();

        DocumentQuery {
            search: params.search,
            category: params.category,
            tags,
            sort_by: params.sort_by.unwrap_or_default(),
            order: params.order.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentResponse>,
    pub total: usize,
    /// Distinct categories across the whole collection, for filter controls.
    pub categories: Vec<String>,
    /// Distinct tags across the whole collection, for filter controls.
    pub tags: Vec<String>,
}

pub const ZOOM_MIN: i64 = 50;
pub const ZOOM_MAX: i64 = 200;
pub const ZOOM_STEP: i64 = 25;
pub const ZOOM_DEFAULT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    pub zoom: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    Pdf,
    Text,
    Other,
}

impl PreviewKind {
    pub fn from_mime_type(mime_type: &str) -> Self {
        if mime_type.contains("pdf") {
            PreviewKind::Pdf
        } else if mime_type.contains("text") {
            PreviewKind::Text
        } else {
            PreviewKind::Other
        }
    }

    /// Placeholder copy; no rendering backend is integrated for any type.
    pub fn placeholder_message(self) -> &'static str {
        match self {
            PreviewKind::Pdf => "PDF rendering is not integrated; download the file to view it.",
            PreviewKind::Text => {
                "Text content rendering is not integrated; download the file to view it."
            }
            PreviewKind::Other => {
                "Preview rendering is not integrated; download the file to view it."
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub id: String,
    pub title: String,
    pub kind: PreviewKind,
    pub message: String,
    pub zoom: i64,
    pub subject: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub file_name: String,
    pub file_size: i64,
    pub file_size_display: String,
    pub mime_type: String,
    pub uploaded_at: String,
}

impl PreviewResponse {
    pub fn new(doc: Document, zoom: Option<i64>) -> Self {
        let kind = PreviewKind::from_mime_type(&doc.mime_type);
        Self {
            id: doc.id,
            title: doc.title,
            kind,
            message: kind.placeholder_message().to_string(),
            zoom: clamp_zoom(zoom),
            subject: doc.subject,
            description: doc.description,
            category: doc.category,
            tags: doc.tags,
            file_name: doc.file_name,
            file_size: doc.file_size,
            file_size_display: format_file_size(doc.file_size),
            mime_type: doc.mime_type,
            uploaded_at: doc.uploaded_at.to_rfc3339(),
        }
    }
}

/// Clamp the cosmetic zoom to 50-200% and snap it to 25% steps.
pub fn clamp_zoom(zoom: Option<i64>) -> i64 {
    let zoom = zoom.unwrap_or(ZOOM_DEFAULT).clamp(ZOOM_MIN, ZOOM_MAX);
    ((zoom + ZOOM_STEP / 2) / ZOOM_STEP) * ZOOM_STEP
}

/// Human-readable byte count: "0 Bytes", "1.5 KB", "2 MB", ...
pub fn format_file_size(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = (((bytes as f64).ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}
