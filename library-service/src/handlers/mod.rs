pub mod documents;
pub mod health;
pub mod metrics;
pub mod sessions;

pub use documents::{
    delete_document, download_document, get_document, list_documents, preview_document,
    upload_document,
};
pub use health::health_check;
pub use self::metrics::metrics;
pub use sessions::{close_session, open_session};
