// ABOUTME: SHA-256 checksum generation for release artifacts
// ABOUTME: Writes checksums files in the `<hex>  <filename>` layout the store reads back

use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::{ChecksumError, Result};

/// One line of a checksums file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    pub checksum: String,
    pub filename: String,
}

impl fmt::Display for ChecksumEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.checksum, self.filename)
    }
}

/// Hex-encoded SHA-256 of a file, streamed rather than read whole
pub fn sha256_file(path: &Path) -> Result<String> {
    let hash_err = |source: io::Error| ChecksumError::Hash {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(hash_err)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let bytes = io::copy(&mut reader, &mut hasher).map_err(hash_err)?;

    let checksum = hex::encode(hasher.finalize());
    debug!("SHA-256 of {} ({} bytes): {}", path.display(), bytes, checksum);
    Ok(checksum)
}

/// Hash each artifact, keyed by its file name without directories
pub fn checksum_artifacts(paths: &[PathBuf]) -> Result<Vec<ChecksumEntry>> {
    paths
        .iter()
        .map(|path| {
            if !path.is_file() {
                return Err(ChecksumError::InvalidArtifact { path: path.clone() });
            }

            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| ChecksumError::InvalidArtifact { path: path.clone() })?;

            Ok(ChecksumEntry {
                checksum: sha256_file(path)?,
                filename,
            })
        })
        .collect()
}

pub fn write_checksums_file(entries: &[ChecksumEntry], output: &Path) -> Result<()> {
    let write_err = |source: io::Error| ChecksumError::Write {
        path: output.to_path_buf(),
        source,
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut file = File::create(output).map_err(write_err)?;
    for entry in entries {
        writeln!(file, "{}", entry).map_err(write_err)?;
    }
    file.flush().map_err(write_err)?;

    info!(
        "Wrote {} checksum entries to {}",
        entries.len(),
        output.display()
    );
    Ok(())
}
