//! HTML and title patterns that locate the performer name.

use once_cell::sync::Lazy;
use regex::Regex;

static STAR_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div class="star-name"><a[^>]*>([^<]+)</a>"#)
        .expect("star-name regex should compile")
});

// Non-greedy and dot-matches-newline: the cast label and its link sit in
// different elements.
static CAST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)出演者.*?<a[^>]*>([^<]+)</a>").expect("cast marker regex should compile")
});

/// Full-width vertical bar separating the page title from the site name.
const TITLE_DELIMITER: char = '｜';

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Catalog page: text of the first performer link in the `star-name` block.
pub fn scan_star_name(html: &str) -> Option<String> {
    STAR_NAME
        .captures(html)
        .and_then(|c| c.get(1))
        .and_then(|m| non_empty(m.as_str()))
}

/// Portal page, tier 1: first link after the cast (`出演者`) marker.
pub fn scan_cast_marker(html: &str) -> Option<String> {
    CAST_MARKER
        .captures(html)
        .and_then(|c| c.get(1))
        .and_then(|m| non_empty(m.as_str()))
}

/// Portal page, tier 2: `"<work title> <performer>｜<site>"` yields `<performer>`.
///
/// Only applies when the delimiter is present and the part before it
/// contains a space.
pub fn title_fallback(title: &str) -> Option<String> {
    let (before_bar, _) = title.split_once(TITLE_DELIMITER)?;
    let (_, performer) = before_bar.trim().rsplit_once(' ')?;
    non_empty(performer)
}
