use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// MIME types accepted by the upload endpoint: PDF, Word (.doc and .docx)
/// and plain text.
pub const ALLOWED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

pub const DEFAULT_CATEGORY: &str = "General";

// Tie-breaker for uploads landing in the same millisecond.
static UPLOAD_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub storage_key: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        subject: String,
        description: String,
        category: String,
        tags: Vec<String>,
        file_name: String,
        mime_type: String,
        file_size: i64,
        storage_key: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: next_id(now),
            title,
            subject,
            description,
            category,
            tags: normalize_tags(tags),
            file_name,
            file_size,
            mime_type,
            storage_key,
            uploaded_at: now,
        }
    }
}

pub fn is_allowed_mime_type(mime_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime_type)
}

/// Document ids are derived from the upload time, with a process-wide
/// sequence number appended so two uploads in the same millisecond still
/// get distinct ids.
fn next_id(now: DateTime<Utc>) -> String {
    let seq = UPLOAD_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", now.timestamp_millis(), seq)
}

/// Trim tags, drop blanks and duplicates, keep first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if !seen.iter().any(|t: &String| t == tag) {
            seen.push(tag.to_string());
        }
    }
    seen
}
