use thiserror::Error;

/// Unified error type for the ScrubLens library.
#[derive(Debug, Error)]
pub enum ScrubLensError {
    #[error("Unknown analysis mode: {0}")]
    UnknownMode(String),

    #[error("Unknown model type: {0}")]
    UnknownModel(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config references unset environment variable: {0}")]
    ConfigEnvVar(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScrubLensError>;
