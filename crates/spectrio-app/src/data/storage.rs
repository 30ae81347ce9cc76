//! Storage layer for JSON persistence
//!
//! Shared file I/O for the station and preference files, with error messages
//! that name the file and the likely cause.

use crate::config::app::NAME;
use crate::error::{AppError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Get the application config directory path (not created)
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir().map(|p| p.join(NAME)).ok_or_else(|| {
        AppError::Config(
            "Could not determine config directory. HOME environment variable may not be set."
                .to_string(),
        )
    })
}

/// Ensure the config directory exists, creating it if necessary
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir()?;
    create_dir_if_needed(&dir)?;
    Ok(dir)
}

/// Get path to a specific data file in the config directory
pub fn data_path(filename: &str) -> Result<PathBuf> {
    Ok(config_dir()?.join(filename))
}

fn create_dir_if_needed(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        let msg = match e.kind() {
            ErrorKind::PermissionDenied => {
                format!("Permission denied: cannot create directory {path:?}")
            }
            _ => format!("Failed to create directory {path:?}: {e}"),
        };
        AppError::Config(msg)
    })
}

/// Load data from a JSON file at a specific path.
///
/// A missing or empty file reads as `None`; an unreadable or malformed file
/// is an error.
pub fn load_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(AppError::Config(format!(
                "Permission denied: cannot read {path:?}"
            )))
        }
        Err(e) => return Err(AppError::Config(format!("Failed to read {path:?}: {e}"))),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    let data = serde_json::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse {path:?}: {e}")))?;
    Ok(Some(data))
}

/// Save data to a JSON file at a specific path, creating parent directories
/// as needed
pub fn save_to<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_if_needed(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(data)
        .map_err(|e| AppError::Config(format!("Failed to serialize data: {e}")))?;

    fs::write(path, content).map_err(|e| {
        let msg = match e.kind() {
            ErrorKind::PermissionDenied => {
                format!("Permission denied: cannot write to {path:?}")
            }
            ErrorKind::ReadOnlyFilesystem => {
                format!("Cannot write to {path:?}: filesystem is read-only")
            }
            _ => format!("Failed to write to {path:?}: {e}"),
        };
        AppError::Config(msg)
    })
}

/// Delete a file; a file that is already gone is not an error
pub fn delete_at(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::Config(format!("Failed to delete {path:?}: {e}"))),
    }
}
