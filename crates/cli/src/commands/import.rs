use std::path::Path;

use prospector_pipeline::{Dashboard, ImportCandidate, ImportReport};

use super::print_json;
use crate::OutputFormat;

/// Read a JSON array of candidate rows.
pub(crate) fn read_rows(path: &Path) -> Result<Vec<ImportCandidate>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("error reading file '{}': {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("error parsing JSON in '{}': {}", path.display(), e))
}

/// Row errors are part of the report, not a command failure.
pub(crate) fn cmd_import(
    dashboard: &mut Dashboard,
    rows: &Path,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    let candidates = read_rows(rows)?;
    let report = dashboard.import(&candidates);
    show_report(&report, output, quiet);
    Ok(())
}

pub(crate) fn show_report(report: &ImportReport, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => print_json(report),
        OutputFormat::Text => {
            println!(
                "imported {} of {} rows ({} failed)",
                report.successful,
                report.total,
                report.failed()
            );
            for error in &report.errors {
                println!("  row {}: {}", error.row, error.message);
            }
            if !quiet && !report.imported_ids.is_empty() {
                println!("new ids: {}", report.imported_ids.join(", "));
            }
        }
    }
}
