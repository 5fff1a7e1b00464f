//! Public output types for update runs.
//!
//! These are what the CLI serializes and what library callers inspect after
//! a run; in mock-run mode they are the only record of what would change.

use serde::Serialize;

use crate::classify::{Category, FileType};
use crate::rules::{LineEdit, RewriteOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Written,
    WouldWrite,
    NotFound,
}

/// What happened to a single file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub path: String,
    pub file_type: FileType,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edits: Vec<LineEdit>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

// ============================================================================
// Category Reports
// ============================================================================

/// Summary of one category pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub category: Category,
    pub mock_run: bool,
    pub scanned: u32,
    pub written: u32,
    pub would_write: u32,
    pub not_found: u32,
    pub files: Vec<FileOutcome>,
}

impl CategoryReport {
    pub fn new(category: Category, mock_run: bool) -> Self {
        Self {
            category,
            mock_run,
            scanned: 0,
            written: 0,
            would_write: 0,
            not_found: 0,
            files: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        path: String,
        file_type: FileType,
        status: FileStatus,
        outcome: RewriteOutcome,
    ) {
        self.scanned += 1;
        match status {
            FileStatus::Written => self.written += 1,
            FileStatus::WouldWrite => self.would_write += 1,
            FileStatus::NotFound => self.not_found += 1,
        }
        self.files.push(FileOutcome {
            path,
            file_type,
            status,
            edits: outcome.edits,
            missing: outcome.missing,
        });
    }

    pub fn file(&self, path_suffix: &str) -> Option<&FileOutcome> {
        self.files.iter().find(|f| f.path.ends_with(path_suffix))
    }
}

// ============================================================================
// Full Runs
// ============================================================================

/// Reports for every category of a run, in processing order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRun {
    pub rootdir: String,
    pub version: String,
    pub version_short: String,
    pub is_release: bool,
    pub mock_run: bool,
    pub categories: Vec<CategoryReport>,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub scanned: u32,
    pub written: u32,
    pub would_write: u32,
    pub not_found: u32,
}

impl RunSummary {
    pub fn from_reports(reports: &[CategoryReport]) -> Self {
        reports.iter().fold(Self::default(), |mut acc, r| {
            acc.scanned += r.scanned;
            acc.written += r.written;
            acc.would_write += r.would_write;
            acc.not_found += r.not_found;
            acc
        })
    }
}
