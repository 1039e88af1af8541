//! Whitespace helpers shared by both parsers.

/// Collapse every whitespace run (newlines included) into one space and trim.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace within each line, dropping blank lines.
///
/// Explicit line breaks (`<br>`, ADF `hardBreak`) are carried as `\n` and
/// survive; everything else collapses.
pub(crate) fn collapse_lines(text: &str) -> String {
    text.split('\n')
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
