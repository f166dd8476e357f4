//! Viewer configuration.
//!
//! Handles loading, validating, and merging `viewer.toml`. Stock defaults are
//! the base layer; the user file only needs the keys it wants to change, and
//! command-line flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source = "README.md"     # Markdown list to parse
//! output = "site"          # Build output directory
//! assets = "assets"        # Copied verbatim into the output directory
//!
//! [site]
//! title = "Awesome Python Viewer"
//! tagline = "Search and browse curated Python libraries from the Awesome Python list."
//! layout = "site"          # "site" links style.css, "standalone" inlines it
//!
//! [parse]
//! ignored_headings = ["awesome python", "resources", "contributing"]
//!
//! [preview]
//! limit = 5                # Categories shown before building (<= 0 = none)
//! mode = "list"            # "list" or "step"
//!
//! [serve]
//! port = 8000
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::generate::{Layout, SiteOptions};
use crate::parse::{DEFAULT_IGNORED_HEADINGS, Parser};
use crate::preview::PreviewMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "viewer.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Viewer configuration loaded from `viewer.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Markdown list to parse.
    pub source: PathBuf,
    /// Build output directory.
    pub output: PathBuf,
    /// Directory whose contents are copied into the output.
    pub assets: PathBuf,
    pub site: SiteConfig,
    pub parse: ParseConfig,
    pub preview: PreviewConfig,
    pub serve: ServeConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("README.md"),
            output: PathBuf::from("site"),
            assets: PathBuf::from("assets"),
            site: SiteConfig::default(),
            parse: ParseConfig::default(),
            preview: PreviewConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.serve.port == 0 {
            return Err(ConfigError::Validation("serve.port must be non-zero".into()));
        }
        if self.parse.ignored_headings.iter().any(|h| h.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "parse.ignored_headings must not contain blank entries".into(),
            ));
        }
        Ok(())
    }

    pub fn parser(&self) -> Parser {
        Parser::with_ignored(&self.parse.ignored_headings)
    }

    pub fn site_options(&self) -> SiteOptions {
        SiteOptions {
            title: self.site.title.clone(),
            tagline: self.site.tagline.clone(),
            layout: self.site.layout,
        }
    }
}

/// Page heading, tagline and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
    pub layout: Layout,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let stock = SiteOptions::default();
        Self {
            title: stock.title,
            tagline: stock.tagline,
            layout: stock.layout,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseConfig {
    /// `##` headings that never become categories (case-insensitive).
    pub ignored_headings: Vec<String>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            ignored_headings: DEFAULT_IGNORED_HEADINGS
                .iter()
                .map(|h| h.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Number of categories previewed before building. Zero or negative
    /// disables the preview.
    pub limit: i64,
    pub mode: PreviewMode,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            mode: PreviewMode::List,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeConfig {
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ViewerConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `path` on top of the stock defaults.
///
/// A missing file yields the defaults; invalid TOML, unknown keys and failed
/// validation are errors.
pub fn load_config(path: &Path) -> Result<ViewerConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = if path.exists() {
        let content = fs::read_to_string(path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(base, overlay)
    } else {
        base
    };
    let config: ViewerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_config`], but the file must exist. Used for `--config`.
pub fn load_explicit_config(path: &Path) -> Result<ViewerConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    load_config(path)
}

/// Returns a fully-commented stock `viewer.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r###"# Awesome Viewer Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags win over this file.
# Unknown keys will cause an error.

# Markdown awesome-list to parse.
source = "README.md"

# Directory the site is written to.
output = "site"

# Directory copied verbatim into the output (stylesheet, icons, ...).
# Subdirectories replace their previous copy entirely on every build.
assets = "assets"

# ---------------------------------------------------------------------------
# Page
# ---------------------------------------------------------------------------
[site]
title = "Awesome Python Viewer"
tagline = "Search and browse curated Python libraries from the Awesome Python list."

# "site" links the style.css copied from the asset directory.
# "standalone" inlines the stock stylesheet into index.html.
layout = "site"

# ---------------------------------------------------------------------------
# Parsing
# ---------------------------------------------------------------------------
[parse]
# "## " headings that never become categories. Compared case-insensitively.
ignored_headings = ["awesome python", "resources", "contributing"]

# ---------------------------------------------------------------------------
# Console preview
# ---------------------------------------------------------------------------
[preview]
# Categories printed before the build. 0 or a negative value disables the preview.
limit = 5

# "list" prints them all at once. "step" pauses after each one when run
# from a terminal.
mode = "list"

# ---------------------------------------------------------------------------
# Local preview server
# ---------------------------------------------------------------------------
[serve]
port = 8000
"###
}
