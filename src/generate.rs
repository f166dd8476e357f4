//! Static site generation.
//!
//! Stage 2 of the pipeline. Takes the parsed catalog and writes a browsable
//! site into the output directory.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html        # Catalog page with embedded data and search filter
//! ├── catalog.json      # [{title, slug, items: [{name, url, description}]}]
//! ├── manifest.json     # {totals: {...}, metadata: {...}}
//! └── style.css         # ...plus everything else from the asset directory
//! ```
//!
//! ## The Page
//!
//! Sections are rendered server-side so the page reads fine without
//! JavaScript. The same catalog is embedded as a JSON data block, and the
//! inline search script re-renders the list from it on every keystroke:
//!
//! - A category is shown when its title contains the query, or when at least
//!   one entry's `name + description` does (case-insensitive).
//! - When the title matches, every entry of the category is shown, even those
//!   that don't mention the query themselves.
//!
//! ## Layouts
//!
//! [`Layout::Site`] links the `style.css` copied from the asset directory.
//! [`Layout::Standalone`] inlines the stock stylesheet so `index.html` works
//! on its own. Both write all three files and copy the assets.
//!
//! ## Asset Copy
//!
//! Top-level files in the asset directory overwrite files of the same name.
//! Top-level directories replace their counterpart wholesale: the old
//! directory is removed before the copy, so files dropped from the asset
//! source don't linger in the output.

use crate::summary::{self, Totals};
use crate::types::{CatalogRecord, Category, flatten};
use clap::ValueEnum;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset directory not found: {0}")]
    AssetsNotFound(PathBuf),
    #[error("Asset copy failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Asset directory {assets} and output directory {output} overlap")]
    AssetsOverlap { assets: PathBuf, output: PathBuf },
}

/// Build metadata written verbatim into `manifest.json`.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Contents of `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub totals: Totals,
    pub metadata: Metadata,
}

/// Paths written by [`SiteBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub index_path: PathBuf,
    pub catalog_path: PathBuf,
    pub manifest_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Link the stylesheet copied from the asset directory
    #[default]
    Site,
    /// Inline the stock stylesheet into index.html
    Standalone,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Site => "site",
            Layout::Standalone => "standalone",
        }
    }
}

/// Page chrome: heading, tagline, layout.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    pub title: String,
    pub tagline: String,
    pub layout: Layout,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            title: "Awesome Python Viewer".to_string(),
            tagline: "Search and browse curated Python libraries from the Awesome Python list."
                .to_string(),
            layout: Layout::Site,
        }
    }
}

const CSS_STATIC: &str = include_str!("../assets/style.css");
const SEARCH_JS: &str = include_str!("../static/search.js");

/// Renders a parsed catalog into an output directory.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    pub asset_dir: PathBuf,
    pub output_dir: PathBuf,
    pub site: SiteOptions,
}

impl SiteBuilder {
    pub fn new(asset_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            output_dir: output_dir.into(),
            site: SiteOptions::default(),
        }
    }

    pub fn with_site(mut self, site: SiteOptions) -> Self {
        self.site = site;
        self
    }

    /// Write `index.html`, `catalog.json` and `manifest.json`, then copy the
    /// assets.
    ///
    /// Any failure aborts the build. Files written before the failure stay on
    /// disk.
    pub fn build(
        &self,
        categories: &[Category],
        metadata: &Metadata,
    ) -> Result<BuildResult, GenerateError> {
        fs::create_dir_all(&self.output_dir)?;
        check_disjoint(&self.asset_dir, &self.output_dir)?;

        let totals = summary::summarize(categories);
        let records = flatten(categories);

        let index_path = self.output_dir.join("index.html");
        let page = render_index(&records, totals, &self.site)?;
        fs::write(&index_path, page.into_string())?;

        let catalog_path = self.output_dir.join("catalog.json");
        write_pretty_json(&catalog_path, &records)?;

        let manifest_path = self.output_dir.join("manifest.json");
        let manifest = Manifest {
            totals,
            metadata: metadata.clone(),
        };
        write_pretty_json(&manifest_path, &manifest)?;

        copy_assets(&self.asset_dir, &self.output_dir)?;

        Ok(BuildResult {
            index_path,
            catalog_path,
            manifest_path,
        })
    }
}

/// Two-space indented JSON with a trailing newline.
fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), GenerateError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

/// Neither directory may contain the other, or the copy would delete or
/// re-walk its own source. A missing asset directory is left for
/// [`copy_assets`] to report.
fn check_disjoint(assets: &Path, output: &Path) -> Result<(), GenerateError> {
    let (Ok(assets), Ok(output)) = (assets.canonicalize(), output.canonicalize()) else {
        return Ok(());
    };
    if assets.starts_with(&output) || output.starts_with(&assets) {
        return Err(GenerateError::AssetsOverlap { assets, output });
    }
    Ok(())
}

/// Copy every top-level file and directory of `src` into `dst`.
fn copy_assets(src: &Path, dst: &Path) -> Result<(), GenerateError> {
    if !src.is_dir() {
        return Err(GenerateError::AssetsNotFound(src.to_path_buf()));
    }

    let mut entries = fs::read_dir(src)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            remove_existing(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            if dst_path.is_dir() {
                fs::remove_dir_all(&dst_path)?;
            }
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn remove_existing(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        Ok(())
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), GenerateError> {
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Catalog data as a JSON literal safe to place inside a `<script>` element.
fn embedded_json(records: &[CatalogRecord]) -> Result<String, serde_json::Error> {
    // `<` only occurs inside JSON strings, where `\u003c` decodes back to it.
    Ok(serde_json::to_string(records)?.replace('<', "\\u003c"))
}

fn base_document(site: &SiteOptions, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (site.title) }
                @match site.layout {
                    Layout::Site => {
                        link rel="stylesheet" href="style.css";
                    }
                    Layout::Standalone => {
                        style { (PreEscaped(CSS_STATIC)) }
                    }
                }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(site: &SiteOptions, totals: Totals) -> Markup {
    html! {
        header.site-header {
            h1 { (site.title) }
            p.tagline { (site.tagline) }
            p.totals {
                (totals.total_categories) " categories · " (totals.total_entries) " entries"
            }
            input id="search" type="search"
                placeholder="Filter by library name, category, or description..."
                aria-label="Search entries";
            p id="search-status" aria-live="polite" {}
        }
    }
}

fn render_section(record: &CatalogRecord) -> Markup {
    html! {
        section id=[(!record.slug.is_empty()).then_some(&record.slug)] {
            h2 { (record.title) }
            ul {
                @for entry in &record.items {
                    li {
                        a href=(entry.url) target="_blank" rel="noopener noreferrer" { (entry.name) }
                        span.description { (entry.description) }
                    }
                }
            }
        }
    }
}

fn render_index(
    records: &[CatalogRecord],
    totals: Totals,
    site: &SiteOptions,
) -> Result<Markup, serde_json::Error> {
    let data = embedded_json(records)?;
    let content = html! {
        (site_header(site, totals))
        main id="content" {
            @for record in records {
                (render_section(record))
            }
        }
        script id="catalog-data" type="application/json" { (PreEscaped(data)) }
        script { (PreEscaped(SEARCH_JS)) }
    };
    Ok(base_document(site, content))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_categories;
    use crate::types::Entry;
    use tempfile::TempDir;

    fn setup_assets(root: &Path) -> PathBuf {
        let assets = root.join("assets");
        fs::create_dir_all(assets.join("icons")).unwrap();
        fs::write(assets.join("style.css"), "body {}").unwrap();
        fs::write(assets.join("icons/a.svg"), "<svg/>").unwrap();
        fs::write(assets.join("icons/b.svg"), "<svg/>").unwrap();
        assets
    }

    fn example_catalog() -> Vec<Category> {
        vec![Category::new(
            "Example",
            vec![Entry::new("Library", "https://example.com", "Helpful library")],
        )]
    }

    fn example_metadata() -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("source_readme".into(), "README.md".into());
        metadata
    }

    #[test]
    fn build_writes_all_outputs() {
        let tmp = TempDir::new().unwrap();
        let assets = setup_assets(tmp.path());
        let out = tmp.path().join("build");

        let result = SiteBuilder::new(&assets, &out)
            .build(&example_catalog(), &example_metadata())
            .unwrap();

        assert_eq!(result.index_path, out.join("index.html"));
        let html = fs::read_to_string(&result.index_path).unwrap();
        assert!(html.contains("Example"));
        assert!(html.contains("Library"));
        assert!(out.join("style.css").exists());
        assert!(out.join("icons/a.svg").exists());
    }

    #[test]
    fn catalog_json_round_trips() {
        let tmp = TempDir::new().unwrap();
        let assets = setup_assets(tmp.path());
        let categories = sample_categories();

        let result = SiteBuilder::new(&assets, tmp.path().join("out"))
            .build(&categories, &Metadata::new())
            .unwrap();

        let text = fs::read_to_string(&result.catalog_path).unwrap();
        assert!(text.ends_with("]\n"));
        assert!(text.contains("\n  {\n    \"title\": \"Category One\""));
        let records: Vec<CatalogRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(records, flatten(&categories));
    }

    #[test]
    fn manifest_has_totals_and_metadata() {
        let tmp = TempDir::new().unwrap();
        let assets = setup_assets(tmp.path());

        let result = SiteBuilder::new(&assets, tmp.path().join("out"))
            .build(&example_catalog(), &example_metadata())
            .unwrap();

        let text = fs::read_to_string(&result.manifest_path).unwrap();
        assert!(text.ends_with("}\n"));
        let manifest: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            manifest["totals"],
            serde_json::json!({"total_categories": 1, "total_entries": 1})
        );
        assert_eq!(manifest["metadata"]["source_readme"], "README.md");
    }

    #[test]
    fn creates_nested_output_directory() {
        let tmp = TempDir::new().unwrap();
        let assets = setup_assets(tmp.path());
        let out = tmp.path().join("a/b/c");

        SiteBuilder::new(&assets, &out)
            .build(&example_catalog(), &Metadata::new())
            .unwrap();
        assert!(out.join("manifest.json").is_file());
    }

    #[test]
    fn missing_asset_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = SiteBuilder::new(tmp.path().join("nope"), tmp.path().join("out"))
            .build(&example_catalog(), &Metadata::new());
        assert!(matches!(result, Err(GenerateError::AssetsNotFound(_))));
    }

    #[test]
    fn output_equal_to_assets_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let assets = setup_assets(tmp.path());

        let result =
            SiteBuilder::new(&assets, &assets).build(&example_catalog(), &Metadata::new());
        assert!(matches!(result, Err(GenerateError::AssetsOverlap { .. })));
        assert!(assets.join("icons/a.svg").is_file());
        assert!(!assets.join("index.html").exists());
    }

    #[test]
    fn output_inside_assets_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let assets = setup_assets(tmp.path());

        let result = SiteBuilder::new(&assets, assets.join("site"))
            .build(&example_catalog(), &Metadata::new());
        assert!(matches!(result, Err(GenerateError::AssetsOverlap { .. })));
        assert!(!assets.join("site/index.html").exists());
    }

    #[test]
    fn rebuild_replaces_asset_directories_wholesale() {
        let tmp = TempDir::new().unwrap();
        let assets = setup_assets(tmp.path());
        let out = tmp.path().join("out");
        let builder = SiteBuilder::new(&assets, &out);

        builder.build(&example_catalog(), &Metadata::new()).unwrap();
        assert!(out.join("icons/b.svg").exists());

        fs::remove_file(assets.join("icons/b.svg")).unwrap();
        fs::write(assets.join("style.css"), "body { color: red; }").unwrap();
        builder.build(&example_catalog(), &Metadata::new()).unwrap();

        assert!(out.join("icons/a.svg").exists());
        assert!(!out.join("icons/b.svg").exists());
        assert_eq!(
            fs::read_to_string(out.join("style.css")).unwrap(),
            "body { color: red; }"
        );
    }

    #[test]
    fn build_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let assets = setup_assets(tmp.path());
        let categories = sample_categories();

        let first = SiteBuilder::new(&assets, tmp.path().join("one"))
            .build(&categories, &example_metadata())
            .unwrap();
        let second = SiteBuilder::new(&assets, tmp.path().join("two"))
            .build(&categories, &example_metadata())
            .unwrap();

        for (a, b) in [
            (&first.index_path, &second.index_path),
            (&first.catalog_path, &second.catalog_path),
            (&first.manifest_path, &second.manifest_path),
        ] {
            assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
        }
    }

    #[test]
    fn index_embeds_data_and_search() {
        let records = flatten(&sample_categories());
        let totals = summary::summarize(&sample_categories());
        let html = render_index(&records, totals, &SiteOptions::default())
            .unwrap()
            .into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="catalog-data""#));
        assert!(html.contains(r#""slug":"category-one""#));
        assert!(html.contains(r#"id="search""#));
        assert!(html.contains("addEventListener('input'"));
        assert!(html.contains(r#"<section id="category-two">"#));
        assert!(html.contains("3 categories · 6 entries"));
    }

    #[test]
    fn site_layout_links_stylesheet() {
        let html = render_index(&[], Totals::default(), &SiteOptions::default())
            .unwrap()
            .into_string();
        assert!(html.contains(r#"<link rel="stylesheet" href="style.css">"#));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn standalone_layout_inlines_stylesheet() {
        let site = SiteOptions {
            layout: Layout::Standalone,
            ..SiteOptions::default()
        };
        let html = render_index(&[], Totals::default(), &site)
            .unwrap()
            .into_string();
        assert!(html.contains("<style>"));
        assert!(html.contains("#search:focus"));
        assert!(!html.contains("href=\"style.css\""));
    }

    #[test]
    fn embedded_json_cannot_close_script() {
        let records = vec![CatalogRecord {
            title: "</script><script>alert(1)</script>".to_string(),
            slug: "x".to_string(),
            items: vec![],
        }];
        let data = embedded_json(&records).unwrap();
        assert!(!data.contains("</script>"));
        let back: Vec<CatalogRecord> = serde_json::from_str(&data).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn html_escapes_entry_text() {
        let record = CatalogRecord {
            title: "Tools".to_string(),
            slug: "tools".to_string(),
            items: vec![Entry::new("<b>bold</b>", "https://x", "a & b")],
        };
        let html = render_section(&record).into_string();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn section_without_slug_has_no_id() {
        let record = CatalogRecord::from(&Category::new(
            "日本語",
            vec![Entry::new("Tool", "https://x", "x")],
        ));
        assert_eq!(record.slug, "");
        let html = render_section(&record).into_string();
        assert!(html.starts_with("<section><h2>日本語</h2>"));
        assert!(!html.contains("id=\"\""));
    }
}
