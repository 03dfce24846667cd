// ABOUTME: In-memory view of a checksums file and the filename lookup over it
// ABOUTME: The file is read once at construction and never held open afterwards

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use super::error::{ChecksumError, Result};

/// How a filename is matched against the lines of a checksums file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// First line containing the filename anywhere in its text
    #[default]
    Substring,
    /// First line whose filename field equals the filename
    Exact,
}

impl FromStr for MatchMode {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "exact" => Ok(MatchMode::Exact),
            other => Err(ChecksumError::UnknownMatchMode(other.to_string())),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Substring => write!(f, "substring"),
            MatchMode::Exact => write!(f, "exact"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChecksumStore {
    source: Option<PathBuf>,
    lines: Vec<String>,
    mode: MatchMode,
}

impl ChecksumStore {
    /// Read a checksums file fully into memory
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ChecksumError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut store = Self::from_contents(&contents);
        store.source = Some(path.to_path_buf());

        info!(
            "Loaded {} checksum entries from {}",
            store.lines.len(),
            path.display()
        );
        Ok(store)
    }

    /// Build a store from checksums file contents already in memory
    pub fn from_contents(contents: &str) -> Self {
        Self {
            source: None,
            lines: contents.lines().map(str::to_owned).collect(),
            mode: MatchMode::default(),
        }
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    /// Path the store was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the checksum recorded for `filename`.
    ///
    /// Surrounding whitespace is trimmed from `filename` first. Lines are
    /// scanned in file order and the first match wins; the checksum is the
    /// part of that line before its first space. In substring mode a
    /// filename that is a substring of another entry (`foo.tar` vs
    /// `foo.tar.gz`) matches that entry.
    pub fn lookup(&self, filename: &str) -> Option<&str> {
        let needle = filename.trim();

        let found = self
            .lines
            .iter()
            .find(|line| self.line_matches(line, needle))
            .map(|line| checksum_field(line));

        match found {
            Some(sum) => debug!("Checksum for '{}': {}", needle, sum),
            None => debug!("No checksum entry matches '{}'", needle),
        }

        found
    }

    fn line_matches(&self, line: &str, needle: &str) -> bool {
        match self.mode {
            MatchMode::Substring => line.contains(needle),
            MatchMode::Exact => filename_field(line) == Some(needle),
        }
    }
}

fn checksum_field(line: &str) -> &str {
    line.split_once(' ').map_or(line, |(sum, _)| sum)
}

// `sha256sum` marks binary-mode entries with a leading '*'
fn filename_field(line: &str) -> Option<&str> {
    line.split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim().trim_start_matches('*'))
        .filter(|name| !name.is_empty())
}
