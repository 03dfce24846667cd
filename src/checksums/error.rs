// ABOUTME: Error types for checksum loading and generation
// ABOUTME: Every variant carries the path that failed so CLI errors are actionable

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChecksumError {
    #[error("Failed to read checksums file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to hash artifact {path}: {source}")]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write checksums file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact is not a regular file: {path}")]
    InvalidArtifact { path: PathBuf },

    #[error("Unknown match mode '{0}'. Expected 'substring' or 'exact'")]
    UnknownMatchMode(String),
}

pub type Result<T> = std::result::Result<T, ChecksumError>;
