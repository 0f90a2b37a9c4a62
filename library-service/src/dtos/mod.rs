pub mod documents;
pub mod sessions;

pub use documents::{
    DocumentListParams, DocumentListResponse, DocumentResponse, PreviewParams, PreviewResponse,
};
pub use sessions::{OpenSessionRequest, SessionResponse};
