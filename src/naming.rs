//! Output page naming.
//!
//! Album pages are named by one of two schemes (see [`PageNaming`]):
//!
//! - **Index**: `album1.htm`, `album2.htm`, … by position in the sorted album
//!   list. Adding or removing an album shifts every later name.
//! - **Slug**: `album_Trip.htm`, `album_Summer_2024.htm`, … derived from the
//!   album name, so names survive changes to the rest of the album set.
//!
//! ## Slugs
//!
//! Whitespace runs become a single `_`; every other character outside
//! `[0-9A-Za-z_-]` becomes `_`:
//! - `"Summer 2024"` → `"Summer_2024"`
//! - `"a  b"` → `"a_b"`
//! - `"高中"` → `"__"`
//!
//! Distinct album names can share a slug (`"高中"` and `"大学"` both give
//! `"__"`). Within one run, a repeated slug gets `_<N>` appended, where N is
//! the album's 1-based position. If that name is taken as well, N counts up
//! until it is free, so every album gets its own file.

use crate::config::{PageNaming, PagesConfig};
use std::collections::HashSet;

/// Convert an album name into a file-name-safe slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            slug.push(c);
        } else {
            slug.push('_');
        }
    }
    slug
}

/// File name of the index-scheme page for the album at 1-based `index`.
pub fn index_filename(pages: &PagesConfig, index: usize) -> String {
    format!("{}{}.{}", pages.prefix, index, pages.extension)
}

fn slug_filename(pages: &PagesConfig, slug: &str) -> String {
    format!("{}_{}.{}", pages.prefix, slug, pages.extension)
}

/// Assign a page file name to each album name, in order.
///
/// The result has the same length and order as `album_names`.
pub fn assign_page_names(pages: &PagesConfig, album_names: &[&str]) -> Vec<String> {
    match pages.naming {
        PageNaming::Index => (1..=album_names.len())
            .map(|i| index_filename(pages, i))
            .collect(),
        PageNaming::Slug => {
            let mut used = HashSet::new();
            album_names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let base = slugify(name);
                    let mut slug = base.clone();
                    let mut n = i + 1;
                    while !used.insert(slug.clone()) {
                        slug = format!("{}_{}", base, n);
                        n += 1;
                    }
                    slug_filename(pages, &slug)
                })
                .collect()
        }
    }
}
