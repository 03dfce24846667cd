// ABOUTME: General-purpose Handlebars helpers available in every manifest template
// ABOUTME: Implements environment lookups and empty-value defaults

use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};
use std::env;

/// Environment variable helper - `{{env "NAME" "fallback"}}`
pub fn env_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let var_name = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("env helper requires variable name parameter"))?;

    let fallback = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

    let value = env::var(var_name).unwrap_or_else(|_| fallback.to_string());
    out.write(&value)?;
    Ok(())
}

/// Default helper - `{{default value "fallback"}}` when value is empty or unset
pub fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");

    let fallback = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("default helper requires a fallback parameter"))?;

    out.write(if value.is_empty() { fallback } else { value })?;
    Ok(())
}

/// Register the built-in helpers with a Handlebars instance
pub fn register_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("env", Box::new(env_helper));
    handlebars.register_helper("default", Box::new(default_helper));
}
