//! Merging a folder's exports into one document.
//!
//! The merger lists the exported files of one format in a folder, orders
//! them naturally (`2.2.0` before `2.10.0`) and writes
//! `ALL_RELEASES_MERGED_<folder>.{txt,docx}` next to them. Previously
//! merged files are never inputs.

mod text;
mod word;

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Local;
use tracing::info;

use crate::error::MergeError;

/// Prefix of merged output files.
pub const MERGED_PREFIX: &str = "ALL_RELEASES_MERGED_";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output format of a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeFormat {
    /// Plain text (`.txt`).
    #[default]
    Txt,
    /// Word (`.docx`).
    Word,
}

impl MergeFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Word => "docx",
        }
    }
}

impl fmt::Display for MergeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Txt => f.write_str("txt"),
            Self::Word => f.write_str("word"),
        }
    }
}

impl FromStr for MergeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Txt),
            "word" | "docx" => Ok(Self::Word),
            other => Err(format!("unknown merge format '{other}' (expected txt or word)")),
        }
    }
}

/// Merges exported files in one folder.
#[derive(Debug, Clone)]
pub struct Merger {
    dir: PathBuf,
}

impl Merger {
    /// Merge the files in `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve a folder argument: used as a path when it exists, otherwise
    /// as a folder name below `output_base`.
    #[must_use]
    pub fn resolve(folder: &str, output_base: &Path) -> Self {
        let path = PathBuf::from(folder);
        if path.exists() {
            Self::new(path)
        } else {
            Self::new(output_base.join(folder))
        }
    }

    /// Folder being merged.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the merged file for `format`.
    pub fn output_path(&self, format: MergeFormat) -> PathBuf {
        self.dir
            .join(format!("{MERGED_PREFIX}{}.{}", self.folder_name(), format.extension()))
    }

    /// Merge every export of `format` into one file and return its path.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::DirectoryNotFound`] if the folder is missing,
    /// [`MergeError::NoFilesFound`] if it holds no exports of `format` (in
    /// which case nothing is written), or an IO/package error if the merged
    /// file cannot be written.
    pub fn merge(&self, format: MergeFormat) -> Result<PathBuf, MergeError> {
        if !self.dir.is_dir() {
            return Err(MergeError::DirectoryNotFound(self.dir.clone()));
        }

        let files = self.input_files(format.extension())?;
        if files.is_empty() {
            return Err(MergeError::NoFilesFound {
                dir: self.dir.clone(),
                extension: format.extension(),
            });
        }
        info!(
            "Merging {} .{} files in {}",
            files.len(),
            format.extension(),
            self.dir.display()
        );

        let header = MergeHeader {
            folder_name: self.folder_name(),
            file_count: files.len(),
            generated: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        };
        let output = self.output_path(format);
        match format {
            MergeFormat::Txt => fs::write(&output, text::merge_text(&header, &files))?,
            MergeFormat::Word => word::merge_word(&header, &files).save(&output)?,
        }

        info!("Merged file written to {}", output.display());
        Ok(output)
    }

    fn folder_name(&self) -> String {
        match self.dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => self.dir.display().to_string(),
        }
    }

    /// Regular files with `extension`, merged outputs excluded, in natural
    /// order.
    fn input_files(&self, extension: &str) -> Result<Vec<PathBuf>, MergeError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with(MERGED_PREFIX) {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) == Some(extension) {
                files.push(path);
            }
        }
        files.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));
        Ok(files)
    }
}

/// Values shared by the merged document's banner.
struct MergeHeader {
    folder_name: String,
    file_count: usize,
    generated: String,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Compare names with digit runs ordered by numeric value.
///
/// Equal-valued runs (`01` vs `1`) and otherwise equal names fall back to
/// plain string order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let l_num = l_run.trim_start_matches('0');
                let r_num = r_run.trim_start_matches('0');
                let ord = l_num.len().cmp(&r_num.len()).then_with(|| l_num.cmp(r_num));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_natural_cmp_orders_versions() {
        let mut names = vec![
            "Release 2.10.0.txt",
            "Release 2.2.0.txt",
            "Release 10.0.txt",
            "Release 2.2.0 hotfix.txt",
            "Alpha.txt",
        ];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(
            names,
            vec![
                "Alpha.txt",
                "Release 2.2.0 hotfix.txt",
                "Release 2.2.0.txt",
                "Release 2.10.0.txt",
                "Release 10.0.txt",
            ]
        );
    }

    #[test]
    fn test_natural_cmp_leading_zeros() {
        assert_eq!(natural_cmp("v01", "v1"), "v01".cmp("v1"));
        assert_eq!(natural_cmp("v009", "v10"), Ordering::Less);
    }

    #[test]
    fn test_merge_format_parse() {
        assert_eq!("txt".parse::<MergeFormat>(), Ok(MergeFormat::Txt));
        assert_eq!("Word".parse::<MergeFormat>(), Ok(MergeFormat::Word));
        assert!("pdf".parse::<MergeFormat>().is_err());
        assert_eq!(MergeFormat::Word.extension(), "docx");
    }

    #[test]
    fn test_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Merger::new(tmp.path().join("absent"))
            .merge(MergeFormat::Txt)
            .unwrap_err();
        assert!(matches!(err, MergeError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_empty_directory_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("notes.docx"), b"x").unwrap();

        let err = Merger::new(tmp.path()).merge(MergeFormat::Txt).unwrap_err();
        assert!(matches!(err, MergeError::NoFilesFound { extension: "txt", .. }));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_input_files_skip_merged_and_subdirs() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b 10.txt"), "").unwrap();
        fs::write(tmp.path().join("b 9.txt"), "").unwrap();
        fs::write(tmp.path().join("ALL_RELEASES_MERGED_x.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("dir.txt")).unwrap();

        let files = Merger::new(tmp.path()).input_files("txt").unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["b 9.txt", "b 10.txt"]);
    }

    #[test]
    fn test_resolve_falls_back_to_output_base() {
        let tmp = tempfile::tempdir().unwrap();
        let merger = Merger::resolve("Release Notes (no such dir)", tmp.path());
        assert_eq!(merger.dir(), tmp.path().join("Release Notes (no such dir)"));
        assert_eq!(
            merger.output_path(MergeFormat::Txt),
            tmp.path()
                .join("Release Notes (no such dir)")
                .join("ALL_RELEASES_MERGED_Release Notes (no such dir).txt")
        );
    }
}
