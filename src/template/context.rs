// ABOUTME: Template context holding the values a manifest template can reference
// ABOUTME: Includes the release tag augmentation sourced from the environment

use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use tracing::debug;

use super::error::{Result, TemplateError};

/// Context key the release tag is stored under
pub const TAG_KEY: &str = "tag";

/// Environment variable holding the release ref name in CI
pub const DEFAULT_TAG_ENV: &str = "GITHUB_REF_NAME";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    values: Map<String, JsonValue>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from plain string variables
    pub fn from_variables(variables: &HashMap<String, String>) -> Self {
        let mut context = Self::new();
        context.extend_variables(variables.clone());
        context
    }

    /// Create a context from a JSON object
    pub fn from_json(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(values) => Ok(Self { values }),
            JsonValue::Null => Ok(Self::new()),
            other => Err(TemplateError::InvalidContext(format!(
                "expected a mapping at the top level, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Load a YAML (or JSON) data file as a context
    pub fn from_data_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let value: JsonValue = serde_yaml::from_str(&contents)?;
        debug!("Loaded template data from {}", path.display());
        Self::from_json(value)
    }

    /// Add or replace a value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Add multiple string variables, replacing existing keys
    pub fn extend_variables(&mut self, vars: HashMap<String, String>) {
        for (key, value) in vars {
            self.values.insert(key, JsonValue::String(value));
        }
    }

    /// Merge another context on top of this one
    pub fn merge(&mut self, other: TemplateContext) {
        self.values.extend(other.values);
    }

    /// Set `tag` from the environment variable `tag_env`.
    ///
    /// The variable must be set; an absent variable is an error rather than
    /// an empty tag. Every other key is left untouched.
    pub fn alter(&mut self, tag_env: &str) -> Result<&mut Self> {
        let tag = env::var(tag_env).map_err(|source| TemplateError::MissingEnvironment {
            var: tag_env.to_string(),
            source,
        })?;
        debug!("Release tag from {}: {}", tag_env, tag);
        Ok(self.set_tag(tag))
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.values
            .insert(TAG_KEY.to_string(), JsonValue::String(tag.into()));
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.values.get(TAG_KEY).and_then(JsonValue::as_str)
    }

    /// Convert context to JSON for handlebars rendering
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.values.clone())
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a sequence",
        JsonValue::Object(_) => "a mapping",
    }
}
