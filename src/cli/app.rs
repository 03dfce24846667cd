// ABOUTME: Main application orchestration for krew-manifest CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands;
use super::{Args, Commands, Config};
use crate::checksums::MatchMode;

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create application from an optional configuration file
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::new(Config::load(config_path)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            self.config.logging.level.as_str()
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // Rendered manifests go to stdout, so logs stay on stderr
        match self.config.logging.format.as_str() {
            "compact" => {
                tracing_subscriber::fmt()
                    .compact()
                    .with_env_filter(env_filter)
                    .with_writer(std::io::stderr)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            }
            _ => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_writer(std::io::stderr)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            }
        }

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&mut self, command: &Commands) -> Result<()> {
        match command {
            Commands::Render {
                vars,
                checksums,
                tag_env,
                exact,
                ..
            } => {
                let variables = Args::parse_variables(vars)?;
                self.config.merge_variables(variables);
                self.override_checksums(checksums.clone(), *exact);
                if let Some(tag_env) = tag_env {
                    self.config.tag_env = tag_env.clone();
                }
            }
            Commands::Lookup {
                checksums, exact, ..
            } => self.override_checksums(checksums.clone(), *exact),
            Commands::Generate { .. } | Commands::Validate { .. } => {}
        }
        Ok(())
    }

    fn override_checksums(&mut self, checksums: Option<PathBuf>, exact: bool) {
        if let Some(path) = checksums {
            self.config.checksums_file = path;
        }
        if exact {
            self.config.match_mode = MatchMode::Exact;
        }
    }

    /// Run the application with parsed arguments
    pub fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting krew-manifest v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration loaded from: {:?}", args.config);

        self.apply_overrides(&args.command)?;

        match args.command {
            Commands::Render {
                template,
                output,
                data,
                ..
            } => commands::render_manifest(template, output, data, &self.config),

            Commands::Lookup { filename, .. } => commands::lookup_checksum(filename, &self.config),

            Commands::Generate { files, output } => {
                commands::generate_checksums(files, output, &self.config)
            }

            Commands::Validate { template } => commands::validate_template(template),
        }
    }
}
