use std::path::Path;

use crate::classify::{Category, FileClassifier, FileDescriptor};
use crate::error::{Error, Result};
use crate::output::{CategoryReport, FileStatus};
use crate::rules::{self, RuleContext};
use crate::utils::io;

#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Log per-file progress
    pub verbose: bool,
    /// Detect and report, but never write
    pub mock_run: bool,
}

/// Applies rewrite rules to files and writes the results back.
///
/// Files are handled one at a time: read fully, rewritten in memory, then
/// overwritten in place. There is no rollback, so an error part way through
/// a category leaves earlier files updated.
pub struct FileUpdateService<'a> {
    ctx: RuleContext<'a>,
    options: UpdateOptions,
}

impl<'a> FileUpdateService<'a> {
    pub fn new(ctx: RuleContext<'a>, options: UpdateOptions) -> Self {
        Self { ctx, options }
    }

    pub fn process_category(
        &self,
        classifier: &FileClassifier<'_>,
        category: Category,
    ) -> Result<CategoryReport> {
        self.process_files(category, classifier.enumerate(category))
    }

    /// Process an explicit list of files as members of `category`.
    pub fn process_files(
        &self,
        category: Category,
        files: impl IntoIterator<Item = FileDescriptor>,
    ) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(category, self.options.mock_run);
        for file in files {
            self.process_file(category, &file, &mut report)?;
        }
        Ok(report)
    }

    fn process_file(
        &self,
        category: Category,
        file: &FileDescriptor,
        report: &mut CategoryReport,
    ) -> Result<()> {
        let display = file.path.display().to_string();

        let mut lines = io::read_lines(&file.path, "read source file")?;
        if self.options.verbose {
            log_status!("update", "Reading {}", display);
        }

        let rule = rules::dispatch(category, file.file_type).ok_or_else(|| {
            Error::rule_unknown_file_type(category.as_str(), file.file_type.as_str(), &display)
        })?;

        let outcome = (rule.apply)(&mut lines, &file.path, &self.ctx);

        if self.options.verbose {
            for edit in &outcome.edits {
                log_status!("update", "{} found on line {} of {}", edit.key, edit.line, display);
            }
        }
        for key in &outcome.missing {
            log_status!("update", "No {} string found in {}", key, display);
        }

        let status = if !outcome.found() {
            FileStatus::NotFound
        } else if self.options.mock_run {
            FileStatus::WouldWrite
        } else {
            self.write(&file.path, &lines, &display)?;
            FileStatus::Written
        };

        report.record(display, file.file_type, status, outcome);
        Ok(())
    }

    fn write(&self, path: &Path, lines: &[String], display: &str) -> Result<()> {
        if self.options.verbose {
            log_status!("update", "Writing file {}", display);
        }
        io::write_lines(path, lines, "write source file")
    }
}
