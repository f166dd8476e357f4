//! CLI output formatting for the build.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ```text
//! ==> Parsing README.md
//! 93 categories, 1204 entries
//! Parsed categories:
//! [1/5] Admin Panels (12 entries)
//! ...
//! ==> Writing site → site
//!     index.html
//!     catalog.json
//!     manifest.json
//! ```

use crate::generate::BuildResult;
use crate::summary::Totals;
use std::path::Path;

/// Plural-aware count, e.g. `1 category`, `3 categories`.
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, plural)
    }
}

pub fn format_stage(label: &str, path: &Path) -> String {
    format!("==> {} {}", label, path.display())
}

/// Totals line, e.g. `93 categories, 1204 entries`.
pub fn format_totals(totals: Totals) -> String {
    format!(
        "{}, {}",
        count(totals.total_categories, "category", "categories"),
        count(totals.total_entries, "entry", "entries")
    )
}

/// Written files, relative to the output directory where possible.
pub fn format_build_output(result: &BuildResult, output_dir: &Path) -> Vec<String> {
    [
        &result.index_path,
        &result.catalog_path,
        &result.manifest_path,
    ]
    .into_iter()
    .map(|path| {
        let shown = path.strip_prefix(output_dir).unwrap_or(path.as_path());
        format!("    {}", shown.display())
    })
    .collect()
}

pub fn print_build_output(result: &BuildResult, output_dir: &Path) {
    for line in format_build_output(result, output_dir) {
        println!("{}", line);
    }
}
