// ABOUTME: Filter registry exposing named one-argument functions to templates
// ABOUTME: Currently provides `sha256`, backed by an explicitly constructed checksum store

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::checksums::ChecksumStore;

/// Name of the checksum filter as seen from templates
pub const SHA256_FILTER: &str = "sha256";

/// A named transformation from one string to an optional string
pub type Filter = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Filters {
    checksums: Arc<ChecksumStore>,
}

impl Filters {
    pub fn new(checksums: Arc<ChecksumStore>) -> Self {
        Self { checksums }
    }

    /// All custom filters keyed by name
    pub fn extra_filters(&self) -> BTreeMap<&'static str, Filter> {
        let checksums = Arc::clone(&self.checksums);
        let sha256: Filter =
            Arc::new(move |filename: &str| checksums.lookup(filename).map(str::to_owned));

        let mut filters = BTreeMap::new();
        filters.insert(SHA256_FILTER, sha256);
        filters
    }
}

/// Handlebars adapter for a [`Filter`]: `{{sha256 "app.tar.gz"}}`.
///
/// An absent filter result renders nothing, not a `None` placeholder, so a
/// missing checksum leaves an empty field in the manifest.
pub struct FilterHelper {
    name: &'static str,
    filter: Filter,
}

impl FilterHelper {
    pub fn new(name: &'static str, filter: Filter) -> Self {
        Self { name, filter }
    }
}

impl HelperDef for FilterHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let input = h.param(0).and_then(|v| v.value().as_str()).ok_or_else(|| {
            RenderError::new(format!("{} helper requires a string parameter", self.name))
        })?;

        if let Some(result) = (self.filter)(input) {
            out.write(&result)?;
        }
        Ok(())
    }
}
