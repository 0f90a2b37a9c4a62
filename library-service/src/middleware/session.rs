use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service_core::error::AppError;

/// SessionKey extractor for library-service
///
/// Extracts the session key from the X-Session-Key header. The key is the
/// access code the client presented to the gate, forwarded verbatim; it
/// scopes every document operation to that session's collection. Handlers
/// still check that the session is actually open in the index.
#[derive(Debug, Clone)]
pub struct SessionKey(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SessionKey
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get("X-Session-Key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::AuthError(anyhow::anyhow!("Missing X-Session-Key header"))
            })?;

        // Add to tracing span for observability
        tracing::Span::current().record("session_key", key);

        Ok(SessionKey(key.to_string()))
    }
}
