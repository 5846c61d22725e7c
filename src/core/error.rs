//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ArtchiveError`] which covers every failure mode of the
//! asset-status engine. It uses `thiserror` for ergonomic error definitions and
//! includes constructor helpers for the common failure scenarios.
//!
//! # Public API
//! - [`ArtchiveError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ArtchiveError>`
//!
//! # Error Categories
//! - **Recompute cycle**: Target is not a directory, worker timed out or failed
//! - **Status source**: The git status command could not run or exited non-zero
//! - **Persistence**: Stored directory path could not be read or written
//! - **Configuration**: Settings file unreadable or malformed
//!
//! Only the recompute-cycle errors abort anything, and only the current cycle.
//! Callers treat the rest as warnings.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Domain-specific error types for artchive
#[derive(Error, Debug)]
pub enum ArtchiveError {
    // Recompute cycle errors
    #[error("Path does not exist or is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("No directory selected")]
    NoDirectorySelected,

    #[error("Recompute did not finish within {timeout:?}")]
    RecomputeTimedOut { timeout: Duration },

    #[error("Recompute worker stopped before reporting a result")]
    RecomputeWorkerFailed,

    // Status source errors
    #[error("Status command '{command}' failed: {reason}")]
    StatusCommandFailed { command: String, reason: String },

    // Persisted path errors
    #[error("Persisted directory path unavailable at '{path}': {source}")]
    PersistedPathUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to persist directory path to '{path}': {source}")]
    PersistedPathWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using ArtchiveError
pub type Result<T> = std::result::Result<T, ArtchiveError>;

impl ArtchiveError {
    /// Create a not-a-directory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create a status command failed error
    pub fn status_command_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StatusCommandFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a persisted path unavailable error
    pub fn persisted_path_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistedPathUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a persisted path write failed error
    pub fn persisted_path_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistedPathWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Whether the error only degrades output instead of aborting a cycle
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Self::StatusCommandFailed { .. }
                | Self::PersistedPathUnavailable { .. }
                | Self::PersistedPathWriteFailed { .. }
        )
    }
}
