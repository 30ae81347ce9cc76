//! Error types for spectrio app services
//!
//! Application-level errors that wrap engine errors and add app-specific variants.

use spectrio::error::SpectrioError;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] SpectrioError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Engine(SpectrioError::Io(e))
    }
}

/// Result type alias for spectrio app services
pub type Result<T> = std::result::Result<T, AppError>;
