use async_trait::async_trait;
use dashmap::DashMap;
use service_core::error::AppError;
use std::sync::Arc;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn upload(&self, key: &str, data: Vec<u8>) -> Result<(), AppError>;
    async fn download(&self, key: &str) -> Result<Vec<u8>, AppError>;
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

/// Blob store holding uploaded bytes in memory for the process lifetime.
/// There is deliberately no durable backend behind it.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload(&self, key: &str, data: Vec<u8>) -> Result<(), AppError> {
        self.blobs.insert(key.to_string(), data);
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, AppError> {
        self.blobs
            .get(key)
            .map(|data| data.clone())
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("No blob stored under {}", key)))
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.blobs.remove(key);
        Ok(())
    }
}
