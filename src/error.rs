use crate::registry::RegistryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackdaterError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Update cancelled by user")]
    UserCancelled,
}

pub type Result<T> = std::result::Result<T, BackdaterError>;
