//! # Awesome Viewer
//!
//! Turns a curated Markdown awesome-list into a small static site: one page
//! with every category and entry, a live search box, and machine-readable
//! copies of the same data.
//!
//! # Pipeline
//!
//! ```text
//! 1. Parse     README.md  →  [Category { title, items: [Entry] }]
//! 2. Preview   catalog    →  console (optional, step-through on a terminal)
//! 3. Generate  catalog    →  site/index.html, catalog.json, manifest.json, assets
//! ```
//!
//! Every build starts from scratch. There is no cache and no incremental
//! mode: the README is small and the whole pipeline is a handful of
//! sequential function calls.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`parse`] | Stage 1 — scans `##` headings and `* [name](url) - description` bullets |
//! | [`summary`] | Category and entry totals, shared by the preview and the manifest |
//! | [`preview`] | Stage 2 — bounded console preview, list or step mode |
//! | [`generate`] | Stage 3 — renders the page with Maud, writes the JSON files, copies assets |
//! | [`config`] | `viewer.toml` loading, merging over stock defaults, validation |
//! | [`types`] | `Entry`, `Category`, the flattened `CatalogRecord`, `slugify` |
//! | [`output`] | CLI output formatting |
//! | [`serve`] | Local static file server for looking at a build |
//!
//! # Design Decisions
//!
//! ## One Flattened Shape
//!
//! `catalog.json` and the data block embedded in `index.html` are the same
//! serialization of [`types::CatalogRecord`]. Anything reading one can read
//! the other.
//!
//! ## Search Without a Backend
//!
//! The page carries its own data and a few dozen lines of vanilla
//! JavaScript. A category whose title matches the query keeps all of its
//! entries; otherwise only matching entries survive. The server-rendered list
//! underneath keeps the page usable with scripts off.

pub mod config;
pub mod generate;
pub mod output;
pub mod parse;
pub mod preview;
pub mod serve;
pub mod summary;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
