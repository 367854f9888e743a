use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CiteweaveError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown keyword strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unknown reference source: {0}")]
    UnknownSource(String),

    #[error("Missing upstream artifact: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CiteweaveError>;
