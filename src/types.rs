//! Shared catalog types used across the pipeline.
//!
//! [`Entry`] and [`Category`] are the in-memory result of parsing. The
//! renderer never serializes them directly: it flattens each category into a
//! [`CatalogRecord`], which is the one shape written to `catalog.json` and
//! embedded in the page.

use serde::{Deserialize, Serialize};

/// One named, linked, described catalog item.
///
/// The URL is kept exactly as written in the source; nothing checks that it
/// resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl Entry {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: description.into(),
        }
    }
}

/// A `## heading` together with the entries listed under it, in document
/// order. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub title: String,
    pub items: Vec<Entry>,
}

impl Category {
    pub fn new(title: impl Into<String>, items: Vec<Entry>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    /// URL-safe anchor derived from the title.
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }
}

/// Flattened `{title, slug, items}` record.
///
/// Used for `catalog.json`, for the data block embedded in `index.html`, and
/// by anything that reads those files back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: String,
    pub slug: String,
    pub items: Vec<Entry>,
}

impl From<&Category> for CatalogRecord {
    fn from(category: &Category) -> Self {
        Self {
            title: category.title.clone(),
            slug: category.slug(),
            items: category.items.clone(),
        }
    }
}

/// Flatten a parsed catalog, preserving order.
pub fn flatten(categories: &[Category]) -> Vec<CatalogRecord> {
    categories.iter().map(CatalogRecord::from).collect()
}

/// Lowercase the value and collapse every run of characters outside
/// `[a-z0-9]` into a single `-`, trimming hyphens at both ends.
///
/// - `"Web Frameworks"` → `"web-frameworks"`
/// - `"Date and Time"` → `"date-and-time"`
/// - `"  C/C++ "` → `"c-c"`
/// - `"Café"` → `"caf"`
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}
