//! Shared test utilities: a sample README and hand-built catalogs.

use crate::types::{Category, Entry};

/// A small README covering the ignored `Resources` heading, the list's own
/// `#` title, and an indented entry.
pub const SAMPLE_README: &str = "\
# Awesome Python

## Web Frameworks
* [Flask](https://flask.palletsprojects.com/) - A simple framework.
* [Django](https://www.djangoproject.com/) - A batteries-included framework.

## Resources
* [Some Resource](https://example.com) - Should be ignored.

## Visualization
* [Matplotlib](https://matplotlib.org/) - Plotting library.
    * [Seaborn](https://seaborn.pydata.org/) - Statistical plots.
";

fn entry(name: &str) -> Entry {
    let slug = name.to_lowercase();
    Entry::new(
        name,
        format!("https://example.com/{slug}"),
        format!("{name} lib"),
    )
}

/// Three categories: four entries, then one, then one.
pub fn sample_categories() -> Vec<Category> {
    vec![
        Category::new(
            "Category One",
            vec![entry("Alpha"), entry("Beta"), entry("Gamma"), entry("Delta")],
        ),
        Category::new("Category Two", vec![entry("Echo")]),
        Category::new("Category Three", vec![entry("Foxtrot")]),
    ]
}
