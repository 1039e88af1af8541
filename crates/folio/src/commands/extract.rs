//! `folio <FOLDER_URL>...` implementation.

use folio_confluence::ConfluenceClient;
use folio_export::{BatchReport, FolderExporter};

use super::SettingsArgs;
use crate::error::CliError;
use crate::output::Output;

/// Folder links to export.
pub(crate) struct ExtractArgs {
    folder_urls: Vec<String>,
}

impl ExtractArgs {
    pub(crate) fn new(folder_urls: Vec<String>) -> Self {
        Self { folder_urls }
    }

    /// Export every folder.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or credentials cannot be loaded,
    /// or [`CliError::FoldersFailed`] if any folder failed.
    pub(crate) fn execute(self, settings: &SettingsArgs) -> Result<(), CliError> {
        let output = Output::new();

        let config = settings.load_config()?;
        let credentials = config.load_credentials()?;
        let client = ConfluenceClient::new(&credentials, &config.confluence);

        output.highlight(&format!("Confluence: {}", client.base_url()));
        output.info(&format!("Output: {}", config.output.dir.display()));

        let exporter = FolderExporter::new(&client, &config.output.dir);
        let report = exporter.export_batch(&self.folder_urls);
        print_report(&output, &report);

        if report.has_failures() {
            return Err(CliError::FoldersFailed {
                failed: report.failed_count(),
                total: report.outcomes.len(),
            });
        }
        Ok(())
    }
}

fn print_report(output: &Output, report: &BatchReport) {
    output.separator();
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(folder) => output.success(&format!(
                "{} pages from '{}' -> {}",
                folder.page_count,
                folder.folder_title,
                folder.output_dir.display()
            )),
            Err(e) => {
                output.error(&format!("Failed: {}", outcome.url));
                output.info(&format!("  {e}"));
            }
        }
    }
    output.separator();

    let total = report.outcomes.len();
    let failed = report.failed_count();
    if failed == 0 {
        output.success(&format!(
            "Exported {} pages from {total} folders",
            report.page_count()
        ));
    } else {
        output.warning(&format!(
            "Exported {} pages; {failed} of {total} folders failed",
            report.page_count()
        ));
    }
}
