// ABOUTME: Checksum module for krew-manifest
// ABOUTME: Loads precomputed checksums files and generates new ones for release artifacts

pub mod error;
pub mod generate;
pub mod store;

pub use error::{ChecksumError, Result};
pub use generate::{checksum_artifacts, sha256_file, write_checksums_file, ChecksumEntry};
pub use store::{ChecksumStore, MatchMode};

/// Default location of the checksums file produced by the release build
pub const DEFAULT_CHECKSUMS_FILE: &str = "dist/checksums.txt";
