//! Markdown catalog parsing.
//!
//! Stage 1 of the pipeline. Turns the text of an awesome-list README into an
//! ordered list of [`Category`] values.
//!
//! ## Recognized Lines
//!
//! Only three line shapes carry meaning; everything else is skipped:
//!
//! ```text
//! ## Web Frameworks                                   ← opens a category
//! * [Flask](https://flask.palletsprojects.com/) - A microframework.
//!     * [Quart](https://quart.palletsprojects.com/) - Async Flask.
//! ```
//!
//! A heading whose title is empty or in the ignore set (the list's own title,
//! `Resources`, `Contributing`) opens nothing, so the bullets after it are
//! dropped until the next heading. Bullets before the first heading are
//! dropped too.
//!
//! ## Two Entry Patterns
//!
//! The top-level bullet pattern is tried first on the line with trailing
//! newline characters removed. Only when that fails is the indented pattern
//! tried, against the raw line, where the four leading spaces are required.
//! The two checks are kept separate so lines that would match both after
//! different normalizations resolve the same way every time.
//!
//! ## Line Boundaries
//!
//! Lines end at `\n`, `\r\n`, a bare `\r`, and the other Unicode line
//! separators (`\x0b`, `\x0c`, `\x1c`..`\x1e`, `\u{85}`, `\u{2028}`,
//! `\u{2029}`). A README saved with old Mac line endings parses the same as
//! one saved on Linux.
//!
//! ## Empty Categories
//!
//! A category is only emitted once it has at least one entry. A heading
//! followed directly by another heading leaves nothing behind.

use crate::types::{Category, Entry};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("README not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No categories with entries found in {0}")]
    EmptyCatalog(PathBuf),
}

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^## (?P<title>.+)").expect("heading pattern is valid"));

static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\* \[(?P<name>[^\]]+)\]\((?P<url>[^\)]+)\)\s*-\s*(?P<description>.+)$")
        .expect("entry pattern is valid")
});

static INDENTED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s{4}\* \[(?P<name>[^\]]+)\]\((?P<url>[^\)]+)\)\s*-\s*(?P<description>.+)$")
        .expect("indented entry pattern is valid")
});

/// Headings that never become categories, compared case-insensitively.
pub const DEFAULT_IGNORED_HEADINGS: &[&str] = &["awesome python", "resources", "contributing"];

/// Line scanner configured with the set of headings to skip.
#[derive(Debug, Clone)]
pub struct Parser {
    ignored: Vec<String>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::with_ignored(DEFAULT_IGNORED_HEADINGS.iter().copied())
    }
}

impl Parser {
    /// Build a parser that skips the given headings instead of the defaults.
    pub fn with_ignored<I, S>(headings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ignored: headings
                .into_iter()
                .map(|h| h.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    fn is_ignored(&self, title: &str) -> bool {
        let lowered = title.to_lowercase();
        self.ignored.iter().any(|h| *h == lowered)
    }

    /// Parse already-loaded Markdown text. Never fails.
    pub fn parse(&self, text: &str) -> Vec<Category> {
        let scan = split_lines(text).fold(Scan::default(), |mut scan, raw_line| {
            scan.feed(self, raw_line);
            scan
        });
        scan.finish()
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on every line boundary, `\r\n` counting as one. A trailing
/// boundary does not produce an empty last line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some((at, c)) = rest.char_indices().find(|&(_, c)| is_line_break(c)) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..at];
        let mut next = at + c.len_utf8();
        if c == '\r' && rest[next..].starts_with('\n') {
            next += 1;
        }
        rest = &rest[next..];
        Some(line)
    })
}

/// Fold state: finished categories plus the one currently open, if any.
#[derive(Default)]
struct Scan {
    done: Vec<Category>,
    open: Option<Category>,
}

impl Scan {
    fn feed(&mut self, parser: &Parser, raw_line: &str) {
        let line = raw_line.trim_end_matches(['\r', '\n']);

        if let Some(caps) = HEADING.captures(line) {
            self.flush();
            let title = caps["title"].trim();
            if !title.is_empty() && !parser.is_ignored(title) {
                self.open = Some(Category::new(title, Vec::new()));
            }
            return;
        }

        let Some(open) = self.open.as_mut() else {
            return;
        };

        let caps = ENTRY
            .captures(line)
            .or_else(|| INDENTED_ENTRY.captures(raw_line));
        if let Some(caps) = caps {
            open.items.push(Entry::new(
                &caps["name"],
                &caps["url"],
                &caps["description"],
            ));
        }
    }

    fn flush(&mut self) {
        match self.open.take() {
            Some(category) if !category.items.is_empty() => self.done.push(category),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Category> {
        self.flush();
        self.done
    }
}

/// Parse with the default ignore set.
pub fn parse(text: &str) -> Vec<Category> {
    Parser::default().parse(text)
}

/// Read and parse a README from disk.
///
/// A missing file is reported as [`ParseError::SourceNotFound`] before any
/// read is attempted.
pub fn parse_file(path: &Path, parser: &Parser) -> Result<Vec<Category>, ParseError> {
    if !path.exists() {
        return Err(ParseError::SourceNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    Ok(parser.parse(&text))
}

/// Like [`parse_file`], but an input that yields no categories is an error.
pub fn load_catalog(path: &Path, parser: &Parser) -> Result<Vec<Category>, ParseError> {
    let categories = parse_file(path, parser)?;
    if categories.is_empty() {
        return Err(ParseError::EmptyCatalog(path.to_path_buf()));
    }
    Ok(categories)
}
