//! Text merge.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

use super::{MergeHeader, file_name, file_stem};

const RULE_WIDTH: usize = 100;

/// Concatenate text exports under a banner, one section per file.
pub(super) fn merge_text(header: &MergeHeader, files: &[PathBuf]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let total = header.file_count;
    let mut out = format!(
        "{rule}\nALL RELEASE NOTES - {}\nMerged from {total} release notes\nGenerated: {}\n{rule}\n\n\n",
        header.folder_name.to_uppercase(),
        header.generated,
    );

    for (index, path) in files.iter().enumerate() {
        let _ = write!(
            out,
            "\n{rule}\nRELEASE {}/{total}: {}\n{rule}\n\n",
            index + 1,
            file_stem(path)
        );
        match fs::read_to_string(path) {
            Ok(content) => {
                out.push_str(&strip_export_header(&content));
                out.push_str("\n\n");
            }
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                let _ = write!(out, "[ERROR: Could not read {}]\n\n", file_name(path));
            }
        }
    }

    let _ = write!(out, "\n{rule}\nEND OF MERGED RELEASE NOTES\n{rule}\n");
    out
}

/// Body of an exported file: everything after the `URL:` line and the
/// blank line following it. Files without a `URL:` line are kept whole.
///
/// When the file opens with a title banner, the `URL:` line is looked for
/// below it only.
fn strip_export_header(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = lines
        .iter()
        .enumerate()
        .skip(banner_end(&lines))
        .find(|(_, line)| line.starts_with("URL:"))
        .map_or(0, |(index, _)| index + 2);
    lines.get(start..).unwrap_or_default().join("\n")
}

/// Index of the line after a leading `=` rule, title, `=` rule banner, or
/// 0 without one.
fn banner_end(lines: &[&str]) -> usize {
    let is_rule = |line: &&str| !line.is_empty() && line.chars().all(|c| c == '=');
    if !lines.first().is_some_and(is_rule) {
        return 0;
    }
    lines
        .iter()
        .skip(1)
        .position(is_rule)
        .map_or(0, |index| index + 2)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn header(count: usize) -> MergeHeader {
        MergeHeader {
            folder_name: "Release Notes".to_owned(),
            file_count: count,
            generated: "2024-05-01 12:00:00".to_owned(),
        }
    }

    #[test]
    fn test_strip_export_header() {
        let content = "====\nTitle\n====\n\nSpace: R\nURL: https://x\n\nBody line\nSecond\n";
        assert_eq!(strip_export_header(content), "Body line\nSecond");
        assert_eq!(strip_export_header("no header\nhere"), "no header\nhere");
        assert_eq!(strip_export_header("URL: at end"), "");
    }

    #[test]
    fn test_title_starting_with_url_stays_in_header() {
        let content = "====\nURL: shortener release\n====\n\nSpace: R\nVersion: 2\n\
                       URL: https://x\n\nBody line\n";
        assert_eq!(strip_export_header(content), "Body line");
    }

    #[test]
    fn test_merge_text_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("1.0.txt");
        let second = tmp.path().join("1.1.txt");
        fs::write(&first, "URL: a\n\nfirst body\n").unwrap();
        fs::write(&second, "second body").unwrap();

        let merged = merge_text(&header(2), &[first, second]);

        let rule = "=".repeat(100);
        let expected = format!(
            "{rule}\nALL RELEASE NOTES - RELEASE NOTES\nMerged from 2 release notes\nGenerated: 2024-05-01 12:00:00\n{rule}\n\n\n\
             \n{rule}\nRELEASE 1/2: 1.0\n{rule}\n\nfirst body\n\n\
             \n{rule}\nRELEASE 2/2: 1.1\n{rule}\n\nsecond body\n\n\
             \n{rule}\nEND OF MERGED RELEASE NOTES\n{rule}\n"
        );
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_unreadable_file_is_recorded() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("gone.txt");
        let merged = merge_text(&header(1), &[missing]);
        assert!(merged.contains("RELEASE 1/1: gone\n"));
        assert!(merged.contains("[ERROR: Could not read gone.txt]\n\n"));
        assert!(merged.ends_with(&format!("END OF MERGED RELEASE NOTES\n{}\n", "=".repeat(100))));
    }
}
