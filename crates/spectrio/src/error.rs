//! Error types for Spectrio
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for the Spectrio engine
#[derive(Error, Debug)]
pub enum SpectrioError {
    #[error("Station not found: {0}")]
    StationNotFound(String),

    #[error("No station available to play")]
    NoStationAvailable,

    #[error("Stream transport error: {0}")]
    Transport(String),

    #[error("Spectrum capture unavailable: {0}")]
    CaptureUnavailable(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Spectrio
pub type Result<T> = std::result::Result<T, SpectrioError>;
