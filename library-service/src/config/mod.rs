use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

const DEFAULT_MAX_FILE_SIZE: &str = "20971520"; // 20 MB

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_file_size: i64,
}

impl LibraryConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(LibraryConfig {
            common: common_config,
            upload: UploadConfig {
                max_file_size: get_env("UPLOAD_MAX_FILE_SIZE", Some(DEFAULT_MAX_FILE_SIZE), is_prod)?
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "UPLOAD_MAX_FILE_SIZE must be a byte count: {}",
                            e
                        ))
                    })?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}
