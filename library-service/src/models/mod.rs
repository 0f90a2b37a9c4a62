pub mod document;

pub use document::{Document, ALLOWED_MIME_TYPES, DEFAULT_CATEGORY};
