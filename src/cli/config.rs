// ABOUTME: Configuration management for krew-manifest
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::checksums::{MatchMode, DEFAULT_CHECKSUMS_FILE};
use crate::template::DEFAULT_TAG_ENV;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub checksums_file: PathBuf,

    pub tag_env: String,

    pub match_mode: MatchMode,

    pub template_vars: HashMap<String, String>,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checksums_file: PathBuf::from(DEFAULT_CHECKSUMS_FILE),
            tag_env: DEFAULT_TAG_ENV.to_string(),
            match_mode: MatchMode::default(),
            template_vars: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        // An explicit path must exist; only searched locations may be absent
        let (config_path, explicit) = match path {
            Some(p) => (p, true),
            None => (Self::find_config_file(), false),
        };

        if explicit && !config_path.is_file() {
            return Err(anyhow::anyhow!(
                "Configuration file not found: {}",
                config_path.display()
            ));
        }

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents).map_err(|e| {
                anyhow::anyhow!("Invalid configuration {}: {}", config_path.display(), e)
            })?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            "krew-manifest.yaml",
            "krew-manifest.yml",
            ".krew-manifest.yaml",
            ".krew-manifest.yml",
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".krew-manifest").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        possible_paths
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
            .unwrap_or_else(|| PathBuf::from(possible_paths[0]))
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    fn merge_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("KREW_MANIFEST_CHECKSUMS") {
            self.checksums_file = PathBuf::from(path);
        }
        if let Some(tag_env) = lookup("KREW_MANIFEST_TAG_ENV") {
            self.tag_env = tag_env;
        }
        if let Some(mode) = lookup("KREW_MANIFEST_MATCH_MODE") {
            self.match_mode = mode.parse()?;
        }

        // Logging configuration
        if let Some(level) = lookup("KREW_MANIFEST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("KREW_MANIFEST_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Merge additional variables into template variables
    pub fn merge_variables(&mut self, vars: HashMap<String, String>) {
        self.template_vars.extend(vars);
    }
}
