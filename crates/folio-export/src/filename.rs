//! Output filenames.

use std::collections::HashSet;

/// Longest sanitized name, in characters.
pub const MAX_FILENAME_CHARS: usize = 200;

const FALLBACK_NAME: &str = "Untitled";

/// Make a title safe to use as a file or directory name.
///
/// Each of `<>:"/\|?*` and control characters becomes `_`, surrounding
/// spaces and dots are trimmed and the result is capped at
/// [`MAX_FILENAME_CHARS`]. An empty result becomes `Untitled`.
pub fn sanitize_filename(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim_matches(|c| c == ' ' || c == '.');
    let capped: String = trimmed.chars().take(MAX_FILENAME_CHARS).collect();
    if capped.is_empty() {
        FALLBACK_NAME.to_owned()
    } else {
        capped
    }
}

/// Hands out unique base filenames within one folder export.
///
/// A title whose sanitized name was already taken gets ` (<page id>)`
/// appended. Comparison ignores ASCII case, matching case-insensitive
/// filesystems.
#[derive(Debug, Default)]
pub struct FileNamer {
    taken: HashSet<String>,
}

impl FileNamer {
    /// Create a namer with no names taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Base filename (without extension) for a page.
    pub fn name_for(&mut self, title: &str, page_id: &str) -> String {
        let base = sanitize_filename(title);
        if self.taken.insert(base.to_ascii_lowercase()) {
            return base;
        }
        let mut candidate = format!("{base} ({page_id})");
        let mut counter = 2;
        while !self.taken.insert(candidate.to_ascii_lowercase()) {
            candidate = format!("{base} ({page_id}-{counter})");
            counter += 1;
        }
        candidate
    }
}
