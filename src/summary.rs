//! Aggregate counts over a parsed catalog.

use crate::types::Category;
use serde::{Deserialize, Serialize};

/// Category and entry counts. Serialized as the `totals` object of
/// `manifest.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub total_categories: usize,
    pub total_entries: usize,
}

impl Totals {
    /// `(category count, entry count)`.
    pub fn as_pair(&self) -> (usize, usize) {
        (self.total_categories, self.total_entries)
    }
}

pub fn summarize(categories: &[Category]) -> Totals {
    Totals {
        total_categories: categories.len(),
        total_entries: categories.iter().map(|c| c.items.len()).sum(),
    }
}
