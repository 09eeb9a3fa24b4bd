//! Site generation report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// One row-scoped failure; `row == 0` marks failures outside any sheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRowError {
    /// 1-based sheet row.
    pub row: u32,
    /// User-facing error text.
    pub message: String,
}

/// Aggregate counters and diagnostics for one site generation run.
#[derive(Debug, Default, Clone)]
pub struct ReportSite {
    /// Data rows visited, including skipped ones.
    pub cnt_rows_scanned: u64,
    /// Item pages written.
    pub cnt_pages_written: u64,
    /// Data rows skipped because of an unusable identifier.
    pub cnt_rows_skipped: u64,
    /// Entries on the index page.
    pub cnt_index_entries: u64,
    /// Scan stopped at the row ceiling before the sentinel row.
    pub if_truncated: bool,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
    /// Per-row and per-cell failures.
    pub errors: Vec<SpecRowError>,
}

impl ReportSite {
    /// Number of collected errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_rows_scanned".to_string(), self.cnt_rows_scanned);
        dict_counts.insert("cnt_pages_written".to_string(), self.cnt_pages_written);
        dict_counts.insert("cnt_rows_skipped".to_string(), self.cnt_rows_skipped);
        dict_counts.insert("cnt_index_entries".to_string(), self.cnt_index_entries);
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} scanned={} written={} skipped={} indexed={} errors={} warnings={} truncated={}",
            dict_counts["cnt_rows_scanned"],
            dict_counts["cnt_pages_written"],
            dict_counts["cnt_rows_skipped"],
            dict_counts["cnt_index_entries"],
            dict_counts["cnt_errors"],
            dict_counts["cnt_warnings"],
            self.if_truncated
        )
    }
}

impl fmt::Display for ReportSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[SITE]"))
    }
}

/// Mutable accumulator for site statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportSiteBuilder {
    /// See [`ReportSite::cnt_rows_scanned`].
    pub cnt_rows_scanned: u64,
    /// See [`ReportSite::cnt_pages_written`].
    pub cnt_pages_written: u64,
    /// See [`ReportSite::cnt_rows_skipped`].
    pub cnt_rows_skipped: u64,
    /// See [`ReportSite::cnt_index_entries`].
    pub cnt_index_entries: u64,
    /// See [`ReportSite::if_truncated`].
    pub if_truncated: bool,
    /// See [`ReportSite::warnings`].
    pub warnings: Vec<String>,
    /// See [`ReportSite::errors`].
    pub errors: Vec<SpecRowError>,
}

impl ReportSiteBuilder {
    /// Increment scanned count by one.
    pub fn add_scanned(&mut self) {
        self.cnt_rows_scanned += 1;
    }

    /// Increment written count by one.
    pub fn add_written(&mut self) {
        self.cnt_pages_written += 1;
    }

    /// Increment skipped count by one.
    pub fn add_skipped(&mut self) {
        self.cnt_rows_skipped += 1;
    }

    /// Record the number of index entries.
    pub fn set_index_entries(&mut self, n_entries: usize) {
        self.cnt_index_entries = n_entries as u64;
    }

    /// Mark the run as cut short by the row ceiling.
    pub fn set_truncated(&mut self) {
        self.if_truncated = true;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Add one row-scoped error.
    pub fn add_error(&mut self, row: u32, message: String) {
        self.errors.push(SpecRowError { row, message });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportSite {
        ReportSite {
            cnt_rows_scanned: self.cnt_rows_scanned,
            cnt_pages_written: self.cnt_pages_written,
            cnt_rows_skipped: self.cnt_rows_skipped,
            cnt_index_entries: self.cnt_index_entries,
            if_truncated: self.if_truncated,
            warnings: self.warnings,
            errors: self.errors,
        }
    }
}
