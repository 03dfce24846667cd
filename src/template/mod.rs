// ABOUTME: Template module for krew-manifest
// ABOUTME: Provides the rendering context, the filter registry and the Handlebars engine

pub mod context;
pub mod engine;
pub mod error;
pub mod filters;
pub mod helpers;

pub use context::{TemplateContext, DEFAULT_TAG_ENV, TAG_KEY};
pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
pub use filters::{Filter, FilterHelper, Filters, SHA256_FILTER};
