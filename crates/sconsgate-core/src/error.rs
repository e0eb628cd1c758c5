//! Error types for build orchestration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to spawn build tool {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Archiver location not set: packaging on {platform} requires the ZIP_LOCATION environment variable")]
    MissingArchiver { platform: &'static str },

    #[error("Packaging command exited with status {status}")]
    PackagingFailed { status: i32 },

    #[error("Allowlist file not found: {0}")]
    AllowlistNotFound(PathBuf),
}

/// Result type for build orchestration operations.
pub type Result<T> = std::result::Result<T, BuildError>;
