//! `folio --merge <FOLDER> [txt|word]` implementation.

use folio_export::{MergeFormat, Merger};

use super::SettingsArgs;
use crate::error::CliError;
use crate::output::Output;

/// Folder and format to merge.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MergeArgs {
    folder: String,
    format: MergeFormat,
}

impl MergeArgs {
    /// Build from the `--merge` values: a folder and an optional format.
    pub(crate) fn from_values(values: Vec<String>) -> Result<Self, CliError> {
        let mut values = values.into_iter();
        let folder = values
            .next()
            .ok_or_else(|| CliError::Validation("--merge requires a folder".to_owned()))?;
        let format = match values.next() {
            Some(format) => format.parse::<MergeFormat>().map_err(CliError::Validation)?,
            None => MergeFormat::default(),
        };
        Ok(Self { folder, format })
    }

    /// Merge the folder's exports.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the merge
    /// fails.
    pub(crate) fn execute(self, settings: &SettingsArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = settings.load_config()?;

        let merger = Merger::resolve(&self.folder, &config.output.dir);
        output.info(&format!(
            "Merging {} files in {}",
            self.format,
            merger.dir().display()
        ));
        let path = merger.merge(self.format)?;
        output.success(&format!("Merged file: {}", path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_format_defaults_to_txt() {
        assert_eq!(
            MergeArgs::from_values(values(&["Notes"])).unwrap(),
            MergeArgs {
                folder: "Notes".to_owned(),
                format: MergeFormat::Txt,
            }
        );
    }

    #[test]
    fn test_word_format() {
        let args = MergeArgs::from_values(values(&["Notes", "word"])).unwrap();
        assert_eq!(args.format, MergeFormat::Word);
    }

    #[test]
    fn test_unknown_format() {
        let err = MergeArgs::from_values(values(&["Notes", "pdf"])).unwrap_err();
        assert!(err.to_string().contains("pdf"));
    }
}
