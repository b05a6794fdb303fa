//! CLI output: error mapping and human-readable command summaries.

use crate::error::ApiError;
use crate::restore::RestoreReport;
use crate::snapshot::SnapshotReport;
use std::path::Path;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Usage(usage) => usage.trim_end().to_string(),
        other => format!("Error: {}", other),
    }
}

pub fn format_snapshot_summary(report: &SnapshotReport, output: &Path) -> String {
    let mut out = format!(
        "Snapshot created successfully - {} {} written to {}",
        report.files_written,
        plural(report.files_written),
        output.display()
    );
    for skipped in &report.skipped {
        out.push_str(&format!(
            "\n  skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        ));
    }
    out
}

pub fn format_restore_summary(report: &RestoreReport, target: &Path) -> String {
    let mut out = format!(
        "Output directory created successfully at directory name '{}' ({} {} written)",
        target.display(),
        report.files_written.len(),
        plural(report.files_written.len())
    );
    for skipped in &report.skipped {
        out.push_str(&format!("\n  {}", skipped));
    }
    out
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "file"
    } else {
        "files"
    }
}
