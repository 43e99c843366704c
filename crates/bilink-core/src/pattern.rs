//! Reference patterns for a link target.
//!
//! File names tend to use `_` and `-` as word separators while prose titles use
//! spaces, so the stem pattern accepts either. Titles are matched literally.

use crate::utils::stem_of;

/// Regex sources for one candidate target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePatterns {
    pub stem: String,
    pub stem_pattern: String,
    pub title_pattern: Option<String>,
}

impl ReferencePatterns {
    pub fn new(basename: &str, title: Option<&str>) -> Self {
        let stem = stem_of(basename);
        let stem_pattern = stem_pattern(&stem);
        Self {
            stem,
            stem_pattern,
            title_pattern: title.map(title_pattern),
        }
    }
}

/// Escape `stem` and let `_`/`-` also match a space.
///
/// ```
/// use bilink_core::pattern::stem_pattern;
///
/// assert_eq!(stem_pattern("my_note"), "My[ _]note");
/// assert_eq!(stem_pattern("foo-bar"), "Foo[ -]bar");
/// assert_eq!(stem_pattern("v1.2"), r"V1\.2");
/// ```
pub fn stem_pattern(stem: &str) -> String {
    let mut pattern = String::with_capacity(stem.len() * 2);
    let mut buf = [0u8; 4];
    for c in stem.chars() {
        match c {
            '_' => pattern.push_str("[ _]"),
            '-' => pattern.push_str("[ -]"),
            _ => pattern.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    capitalize_first(&pattern)
}

/// Escape a title for literal matching
pub fn title_pattern(title: &str) -> String {
    regex::escape(title)
}

// Only single-char uppercase mappings: `ß` -> `SS` would stop matching `ß`.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => std::iter::once(u).chain(chars).collect(),
        _ => s.to_string(),
    }
}
