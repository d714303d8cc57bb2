//! Build configuration module.
//!
//! Handles loading and validating the `config.toml` that sits next to the
//! profile data. Stock defaults are the base layer; the user file only needs
//! the keys it wants to override.
//!
//! ## Config File Location
//!
//! ```text
//! profile/
//! ├── config.toml      # Optional, overrides stock defaults
//! ├── data.json        # Profile document
//! ├── template.html    # Page template with {{name}} and {{content}} markers
//! ├── style.css        # Copied next to the generated page
//! └── assets/          # Optional, copied to the output root
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! data = "data.json"
//! template = "template.html"
//! stylesheet = "style.css"
//! output_file = "index.html"
//! assets_dir = "assets"
//! strict_markers = false
//!
//! [markers]
//! content = "{{content}}"
//! name = "{{name}}"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `config.toml`.
///
/// All paths are relative to the source directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Profile document (JSON).
    pub data: String,
    /// HTML template containing the content and name markers.
    pub template: String,
    /// Stylesheet copied into the output directory under its own file name.
    pub stylesheet: String,
    /// File name of the generated page inside the output directory.
    pub output_file: String,
    /// Directory of static assets copied to the output root when present.
    pub assets_dir: String,
    /// Fail the build when a template marker is missing instead of warning.
    pub strict_markers: bool,
    /// Placeholder strings replaced in the template.
    pub markers: MarkerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data: "data.json".to_string(),
            template: "template.html".to_string(),
            stylesheet: "style.css".to_string(),
            output_file: "index.html".to_string(),
            assets_dir: "assets".to_string(),
            strict_markers: false,
            markers: MarkerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable before any file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("data", &self.data),
            ("template", &self.template),
            ("stylesheet", &self.stylesheet),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if !is_bare_file_name(&self.output_file) {
            return Err(ConfigError::Validation(
                "output_file must be a plain file name".into(),
            ));
        }
        if self.markers.content.is_empty() || self.markers.name.is_empty() {
            return Err(ConfigError::Validation(
                "markers.content and markers.name must not be empty".into(),
            ));
        }
        let (content, name) = (&self.markers.content, &self.markers.name);
        if content.contains(name.as_str()) || name.contains(content.as_str()) {
            return Err(ConfigError::Validation(
                "markers.content and markers.name must not contain one another".into(),
            ));
        }
        Ok(())
    }
}

fn is_bare_file_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty() && path.file_name().is_some_and(|f| f == path.as_os_str())
}

/// Template placeholder strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    /// Replaced by the rendered page body.
    pub content: String,
    /// Replaced by the escaped profile name.
    pub name: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            content: "{{content}}".to_string(),
            name: "{{name}}".to_string(),
        }
    }
}

/// Load config from `config.toml` in the given directory.
///
/// A missing file means stock defaults. Absent keys fall back to their
/// defaults, unknown keys are rejected, and the result is validated.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let config = if config_path.exists() {
        toml::from_str::<SiteConfig>(&fs::read_to_string(&config_path)?)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    log::debug!("loaded config from {}", root.display());
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Profile Page Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to the source
# directory. Unknown keys will cause an error.
#
# The contact email and phone are never read from the data file. They come
# from the PII_EMAIL and PII_PHONE environment variables at build time.

# Profile document (JSON).
data = "data.json"

# HTML template. Must contain the content and name markers below.
template = "template.html"

# Stylesheet, copied into the output directory under the same file name.
stylesheet = "style.css"

# Name of the generated page inside the output directory.
output_file = "index.html"

# Static assets (favicon, fonts) copied to the output root if the directory exists.
assets_dir = "assets"

# Treat a marker missing from the template as a build error.
# When false, a warning is logged and the page is still written.
strict_markers = false

# ---------------------------------------------------------------------------
# Template markers
# ---------------------------------------------------------------------------
[markers]
# Replaced by the rendered page body.
content = "{{content}}"

# Replaced by the HTML-escaped profile name.
name = "{{name}}"
"##
}
