// ABOUTME: Main library module for krew-manifest
// ABOUTME: Exports the checksum store, template rendering and CLI modules

pub mod checksums;
pub mod cli;
pub mod template;

// Re-export commonly used types
pub use checksums::{ChecksumStore, MatchMode};
pub use cli::{App, Args, Config};
pub use template::{Filters, TemplateContext, TemplateEngine};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
