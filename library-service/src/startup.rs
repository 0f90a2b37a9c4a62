use crate::config::LibraryConfig;
use crate::handlers;
use crate::services::{LibraryIndex, MemoryStorage, Storage};
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{delete, get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: LibraryConfig,
    pub db: LibraryIndex,
    pub storage: Arc<dyn Storage>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: LibraryConfig) -> Result<Self, AppError> {
        let db = LibraryIndex::new();
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

        let state = AppState {
            config: config.clone(),
            db: db.clone(),
            storage,
        };

        // Multipart bodies carry the whole file; leave headroom for the
        // metadata fields around it.
        let body_limit = config.upload.max_file_size as usize + 64 * 1024;

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/metrics", get(handlers::metrics))
            .route("/sessions", post(handlers::open_session))
            .route("/sessions/:key", delete(handlers::close_session))
            .route(
                "/documents",
                post(handlers::upload_document).get(handlers::list_documents),
            )
            .route(
                "/documents/:id",
                get(handlers::get_document).delete(handlers::delete_document),
            )
            .route("/documents/:id/preview", get(handlers::preview_document))
            .route("/documents/:id/content", get(handlers::download_document))
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(from_fn(metrics_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(from_fn(security_headers_middleware))
            .layer(CorsLayer::permissive())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn db(&self) -> &LibraryIndex {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
