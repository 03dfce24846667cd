// ABOUTME: Error types for template context and rendering operations
// ABOUTME: Defines specific error types for environment lookups and Handlebars processing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Environment variable {var} is not usable: {source}")]
    MissingEnvironment {
        var: String,
        #[source]
        source: std::env::VarError,
    },

    #[error("Template syntax error: {0}")]
    SyntaxError(String),

    #[error("Invalid template context: {0}")]
    InvalidContext(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Handlebars error: {0}")]
    HandlebarsError(#[from] handlebars::RenderError),

    #[error("Context data error: {0}")]
    DataError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
