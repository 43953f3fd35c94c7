//! Plain-text diff report export
//!
//! ```text
//! ldiff report
//! added: 1, removed: 0, modified: 0 (conflicts: 0), unchanged: 1
//!
//! --- UNCHANGED SECTION (Lines 1-1) ---
//!   a
//! --- CHANGED SECTION (Lines 2-2) ---
//! + b
//! ```

use crate::diff::{DiffResult, DiffStats};
use crate::line::{LineKind, LineRecord};

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Emit the title and counts preamble
    pub summary: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { summary: true }
    }
}

/// Export a report with the summary preamble
pub fn export_report(result: &DiffResult) -> String {
    export_report_with(result, ReportOptions::default())
}

pub fn export_report_with(result: &DiffResult, options: ReportOptions) -> String {
    let mut out = String::new();

    if options.summary {
        out.push_str("ldiff report\n");
        out.push_str(&summary_line(&result.stats));
        out.push_str("\n\n");
    }

    for section in &result.sections {
        // Section bounds are 1-based positions in the record sequence
        out.push_str(&format!(
            "--- {} SECTION (Lines {}-{}) ---\n",
            section.kind.label(),
            section.start + 1,
            section.end + 1
        ));
        for record in result.section_records(section) {
            out.push_str(&report_line(record));
            out.push('\n');
        }
    }

    out
}

/// One-line summary of counts
pub fn summary_line(stats: &DiffStats) -> String {
    format!(
        "added: {}, removed: {}, modified: {} (conflicts: {}), unchanged: {}",
        stats.added, stats.removed, stats.modified, stats.conflicts, stats.unchanged
    )
}

fn report_line(record: &LineRecord) -> String {
    let prefix = record.kind.prefix();
    match record.kind {
        LineKind::Modified => format!("{prefix} {} -> {}", record.old_text, record.new_text),
        _ => format!("{prefix} {}", record.display_text()),
    }
}
