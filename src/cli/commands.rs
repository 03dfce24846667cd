// ABOUTME: Command implementations for the krew-manifest CLI
// ABOUTME: Handles execution of render, lookup, generate, and validate commands

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use crate::checksums::{self, ChecksumStore};
use crate::template::{Filters, TemplateContext, TemplateEngine};

/// Render a manifest template
pub fn render_manifest(
    template_path: PathBuf,
    output: Option<PathBuf>,
    data: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    info!("Rendering manifest template: {}", template_path.display());

    let store = load_store(config)?;

    let mut context = match data {
        Some(ref data_path) => TemplateContext::from_data_file(data_path).map_err(|e| {
            anyhow::anyhow!("Failed to load template data {}: {}", data_path.display(), e)
        })?,
        None => TemplateContext::new(),
    };
    context.extend_variables(config.template_vars.clone());
    context.alter(&config.tag_env)?;
    info!("Release tag: {}", context.tag().unwrap_or_default());

    let engine = TemplateEngine::with_filters(&Filters::new(Arc::new(store)));
    let rendered = engine.render_file(&template_path, &context).map_err(|e| {
        anyhow::anyhow!(
            "Failed to render template {}: {}",
            template_path.display(),
            e
        )
    })?;

    match output {
        Some(output_path) => {
            write_file(&output_path, &rendered)?;
            info!("Manifest written to: {}", output_path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Print the checksum recorded for one artifact
pub fn lookup_checksum(filename: String, config: &Config) -> Result<()> {
    let store = load_store(config)?;

    match store.lookup(&filename) {
        Some(checksum) => {
            println!("{}", checksum);
            Ok(())
        }
        None => Err(anyhow::anyhow!(
            "No checksum found for '{}' in {}",
            filename.trim(),
            config.checksums_file.display()
        )),
    }
}

/// Write a checksums file for the given artifacts
pub fn generate_checksums(
    files: Vec<PathBuf>,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let output = output.unwrap_or_else(|| config.checksums_file.clone());
    info!(
        "Generating checksums for {} artifacts into {}",
        files.len(),
        output.display()
    );

    let entries = checksums::checksum_artifacts(&files)?;
    checksums::write_checksums_file(&entries, &output)?;

    for entry in &entries {
        println!("{}", entry);
    }

    Ok(())
}

/// Check a template for syntax errors
pub fn validate_template(template_path: PathBuf) -> Result<()> {
    info!("Validating template: {}", template_path.display());

    let template = std::fs::read_to_string(&template_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read template {}: {}",
            template_path.display(),
            e
        )
    })?;

    TemplateEngine::new()
        .validate_template(&template)
        .map_err(|e| anyhow::anyhow!("Template validation failed: {}", e))?;

    println!("✓ Template '{}' is valid", template_path.display());
    Ok(())
}

fn load_store(config: &Config) -> Result<ChecksumStore> {
    let store = ChecksumStore::load(&config.checksums_file)?.with_match_mode(config.match_mode);
    info!("Checksum match mode: {}", store.match_mode());
    Ok(store)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write output file '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksums::MatchMode;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(temp_dir: &TempDir, sums: &str, tag_env: &str) -> Config {
        let checksums_file = temp_dir.path().join("dist").join("checksums.txt");
        fs::create_dir_all(checksums_file.parent().unwrap()).unwrap();
        fs::write(&checksums_file, sums).unwrap();

        Config {
            checksums_file,
            tag_env: tag_env.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_render_manifest_to_file() {
        std::env::set_var("KREW_MANIFEST_TEST_RENDER_TAG", "v0.9.0");
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(
            &temp_dir,
            "abc123 exec_linux_amd64.tar.gz\n",
            "KREW_MANIFEST_TEST_RENDER_TAG",
        );
        config
            .template_vars
            .insert("name".to_string(), "exec".to_string());

        let template = temp_dir.path().join(".krew.yaml");
        fs::write(
            &template,
            "name: {{name}}\nversion: {{tag}}\nsha256: {{sha256 \"exec_linux_amd64.tar.gz\"}}\n",
        )
        .unwrap();

        let output = temp_dir.path().join("plugins").join("exec.yaml");
        render_manifest(template, Some(output.clone()), None, &config).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "name: exec\nversion: v0.9.0\nsha256: abc123\n"
        );
    }

    #[test]
    fn test_render_manifest_with_data_file() {
        std::env::set_var("KREW_MANIFEST_TEST_RENDER_DATA_TAG", "v1.0.0");
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(
            &temp_dir,
            "abc123 exec.tar.gz\n",
            "KREW_MANIFEST_TEST_RENDER_DATA_TAG",
        );

        let data = temp_dir.path().join("data.yaml");
        fs::write(&data, "tag: overwritten\nplatforms: [linux, darwin]\n").unwrap();

        let template = temp_dir.path().join("t.hbs");
        fs::write(&template, "{{tag}}:{{#each platforms}}{{this}},{{/each}}").unwrap();

        let output = temp_dir.path().join("out.txt");
        render_manifest(template, Some(output.clone()), Some(data), &config).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "v1.0.0:linux,darwin,");
    }

    #[test]
    fn test_render_manifest_requires_tag_env() {
        std::env::remove_var("KREW_MANIFEST_TEST_RENDER_NO_TAG");
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir, "", "KREW_MANIFEST_TEST_RENDER_NO_TAG");

        let template = temp_dir.path().join("t.hbs");
        fs::write(&template, "{{tag}}").unwrap();

        let err = render_manifest(template, None, None, &config).unwrap_err();
        assert!(err.to_string().contains("KREW_MANIFEST_TEST_RENDER_NO_TAG"));
    }

    #[test]
    fn test_render_manifest_requires_checksums_file() {
        std::env::set_var("KREW_MANIFEST_TEST_RENDER_NO_SUMS", "v1.0.0");
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            checksums_file: temp_dir.path().join("missing.txt"),
            tag_env: "KREW_MANIFEST_TEST_RENDER_NO_SUMS".to_string(),
            ..Config::default()
        };

        let template = temp_dir.path().join("t.hbs");
        fs::write(&template, "{{tag}}").unwrap();

        let err = render_manifest(template, None, None, &config).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_lookup_checksum() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(&temp_dir, "abc123 foo.tar.gz\n", "UNUSED");

        assert!(lookup_checksum("foo.tar.gz".to_string(), &config).is_ok());
        assert!(lookup_checksum("foo.tar".to_string(), &config).is_ok());

        config.match_mode = MatchMode::Exact;
        let err = lookup_checksum("foo.tar".to_string(), &config).unwrap_err();
        assert!(err.to_string().contains("No checksum found for 'foo.tar'"));
    }

    #[test]
    fn test_generate_checksums_defaults_to_configured_file() {
        let temp_dir = TempDir::new().unwrap();
        let artifact = temp_dir.path().join("exec.tar.gz");
        fs::write(&artifact, "Hello, World!").unwrap();

        let config = Config {
            checksums_file: temp_dir.path().join("dist").join("checksums.txt"),
            ..Config::default()
        };

        generate_checksums(vec![artifact], None, &config).unwrap();

        let store = ChecksumStore::load(&config.checksums_file).unwrap();
        assert_eq!(
            store.lookup("exec.tar.gz"),
            Some("dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f")
        );
    }

    #[test]
    fn test_validate_template() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.hbs");
        let bad = temp_dir.path().join("bad.hbs");
        fs::write(&good, "version: {{tag}}").unwrap();
        fs::write(&bad, "version: {{tag}").unwrap();

        assert!(validate_template(good).is_ok());
        assert!(validate_template(bad).is_err());
        assert!(validate_template(temp_dir.path().join("absent.hbs")).is_err());
    }
}
