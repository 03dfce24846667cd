// ABOUTME: Main template engine implementation using Handlebars
// ABOUTME: Renders manifest templates with the built-in helpers and registered filters

use handlebars::Handlebars;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::context::TemplateContext;
use super::error::{Result, TemplateError};
use super::filters::{Filter, FilterHelper, Filters};
use super::helpers;

#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a template engine with the built-in helpers only
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        // Manifests are YAML, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        helpers::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Create a template engine with every filter from `filters` registered
    pub fn with_filters(filters: &Filters) -> Self {
        let mut engine = Self::new();
        engine.register_filters(filters.extra_filters());
        engine
    }

    /// Register filters as helpers; a filter replaces a helper of the same name
    pub fn register_filters(&mut self, filters: BTreeMap<&'static str, Filter>) {
        for (name, filter) in filters {
            debug!("Registering template filter: {}", name);
            self.handlebars
                .register_helper(name, Box::new(FilterHelper::new(name, filter)));
        }
    }

    /// Render a template string with the given context
    pub fn render(&self, template: &str, context: &TemplateContext) -> Result<String> {
        self.handlebars
            .render_template(template, &context.to_json())
            .map_err(TemplateError::HandlebarsError)
    }

    /// Read and render a template file
    pub fn render_file(&self, path: &Path, context: &TemplateContext) -> Result<String> {
        let template = std::fs::read_to_string(path)?;
        let rendered = self.render(&template, context)?;
        debug!(
            "Rendered {} ({} characters)",
            path.display(),
            rendered.len()
        );
        Ok(rendered)
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        handlebars::Template::compile(template)
            .map(|_| ())
            .map_err(|e| TemplateError::SyntaxError(e.to_string()))
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
