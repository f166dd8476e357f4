//! Console preview of the parsed catalog.
//!
//! Shows the first few categories so the list can be eyeballed before the
//! site is written:
//!
//! ```text
//! Parsed categories:
//! [1/2] Web Frameworks (5 entries)
//!   - Django: A batteries-included framework.
//!   - Flask: A microframework.
//!   - Pyramid: A small, fast web framework.
//!     …and 2 more entries
//! [2/2] Testing (1 entries)
//!   - pytest: A mature testing tool.
//! ```
//!
//! In step mode on an interactive terminal the reporter pauses after each
//! category except the last. `q` (any case, surrounding whitespace ignored)
//! or end of input stops the preview; anything else moves on. Nothing here
//! can fail the build: write errors and closed input just end the preview.

use crate::types::Category;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, IsTerminal, Write};

/// Entries shown per category before the remainder is summarized.
const ENTRIES_SHOWN: usize = 3;

const PROMPT: &str = "Press Enter for next category (or q to quit): ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Print every previewed category at once
    #[default]
    List,
    /// Pause for Enter between categories (interactive terminals only)
    Step,
}

impl PreviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewMode::List => "list",
            PreviewMode::Step => "step",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    pub limit: usize,
    pub mode: PreviewMode,
    pub interactive: bool,
}

/// Categories actually previewed for a requested limit. Zero and negative
/// limits preview nothing.
pub fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit.max(0)).unwrap_or(usize::MAX)
}

impl PreviewOptions {
    fn stepwise(&self) -> bool {
        self.interactive && self.mode == PreviewMode::Step
    }
}

/// Format one category block: header, up to three entries, remainder line.
pub fn format_category(index: usize, shown: usize, category: &Category) -> Vec<String> {
    let mut lines = vec![format!(
        "[{}/{}] {} ({} entries)",
        index,
        shown,
        category.title,
        category.items.len()
    )];
    for entry in category.items.iter().take(ENTRIES_SHOWN) {
        lines.push(format!("  - {}: {}", entry.name, entry.description));
    }
    let remaining = category.items.len().saturating_sub(ENTRIES_SHOWN);
    if remaining > 0 {
        lines.push(format!("    …and {} more entries", remaining));
    }
    lines
}

/// Write the preview to `out`, reading step responses from `input`.
pub fn preview<R: BufRead, W: Write>(
    categories: &[Category],
    options: &PreviewOptions,
    input: &mut R,
    out: &mut W,
) {
    // A broken pipe or closed terminal only cuts the preview short.
    let _ = write_preview(categories, options, input, out);
}

fn write_preview<R: BufRead, W: Write>(
    categories: &[Category],
    options: &PreviewOptions,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let shown = options.limit.min(categories.len());
    if shown == 0 {
        return Ok(());
    }

    writeln!(out, "Parsed categories:")?;
    for (i, category) in categories[..shown].iter().enumerate() {
        let index = i + 1;
        for line in format_category(index, shown, category) {
            writeln!(out, "{}", line)?;
        }
        if options.stepwise() && index < shown && !wait_for_next(input, out)? {
            break;
        }
    }
    out.flush()
}

/// Prompt once. Returns `false` when the user asked to stop or input ended.
fn wait_for_next<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "{}", PROMPT)?;
    out.flush()?;
    let mut response = String::new();
    match input.read_line(&mut response) {
        Ok(0) | Err(_) => Ok(false),
        Ok(_) => Ok(!response.trim().eq_ignore_ascii_case("q")),
    }
}

/// Preview on the process's stdin/stdout.
///
/// Step mode only engages when stdin is a terminal.
pub fn print_preview(categories: &[Category], limit: usize, mode: PreviewMode) {
    let options = PreviewOptions {
        limit,
        mode,
        interactive: io::stdin().is_terminal(),
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    preview(categories, &options, &mut stdin.lock(), &mut stdout.lock());
}
