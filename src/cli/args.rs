// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for krew-manifest

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "krew-manifest")]
#[command(about = "Render release manifests with the release tag and artifact checksums")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a manifest template
    Render {
        #[arg(help = "Path to the Handlebars manifest template")]
        template: PathBuf,

        #[arg(short, long, help = "Write the rendered manifest here instead of stdout")]
        output: Option<PathBuf>,

        #[arg(
            short = 'V',
            long = "var",
            help = "Extra template variables (key=value)"
        )]
        vars: Vec<String>,

        #[arg(short, long, help = "YAML or JSON file with extra template data")]
        data: Option<PathBuf>,

        #[arg(long, help = "Checksums file to look artifacts up in")]
        checksums: Option<PathBuf>,

        #[arg(long, help = "Environment variable holding the release tag")]
        tag_env: Option<String>,

        #[arg(long, help = "Match artifact names exactly instead of by substring")]
        exact: bool,
    },

    /// Print the checksum recorded for an artifact
    Lookup {
        #[arg(help = "Artifact file name")]
        filename: String,

        #[arg(long, help = "Checksums file to look the artifact up in")]
        checksums: Option<PathBuf>,

        #[arg(long, help = "Match the artifact name exactly instead of by substring")]
        exact: bool,
    },

    /// Compute SHA-256 checksums of release artifacts
    Generate {
        #[arg(required = true, help = "Artifacts to checksum")]
        files: Vec<PathBuf>,

        #[arg(short, long, help = "Checksums file to write")]
        output: Option<PathBuf>,
    },

    /// Check a template for syntax errors without rendering it
    Validate {
        #[arg(help = "Path to the Handlebars manifest template")]
        template: PathBuf,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<HashMap<String, String>> {
        let mut variables = HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}
