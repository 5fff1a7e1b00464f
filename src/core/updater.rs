use std::path::PathBuf;

use crate::classify::{Category, FileClassifier};
use crate::defaults::{self, VerstampConfig};
use crate::error::Result;
use crate::layout::RootLayout;
use crate::output::{CategoryReport, RunSummary, UpdateRun};
use crate::rules::RuleContext;
use crate::update::{FileUpdateService, UpdateOptions};
use crate::version::VersionSpec;

/// Options accepted by [`VersionUpdater::new`].
#[derive(Debug, Clone, Default)]
pub struct UpdaterOptions {
    /// Project root; `None` or empty means the current directory. `~` is expanded.
    pub rootdir: Option<String>,
    pub version: String,
    pub version_short: Option<String>,
    pub is_release: bool,
    pub verbose: bool,
    pub mock_run: bool,
}

/// Entry point for rewriting version strings in a project tree.
///
/// Construction loads `verstamp.json` (if any) and validates the root layout;
/// after that each `update_*` method processes one category independently.
#[derive(Debug)]
pub struct VersionUpdater {
    config: VerstampConfig,
    layout: RootLayout,
    version: VersionSpec,
    options: UpdateOptions,
}

impl VersionUpdater {
    pub fn new(options: UpdaterOptions) -> Result<Self> {
        let version = VersionSpec::new(
            &options.version,
            options.version_short.as_deref(),
            options.is_release,
        )?;

        let root = resolve_root(options.rootdir.as_deref());
        let config = defaults::load_config(&root)?;
        let layout = RootLayout::resolve(&root, &config.layout)?;

        Ok(Self {
            config,
            layout,
            version,
            options: UpdateOptions {
                verbose: options.verbose,
                mock_run: options.mock_run,
            },
        })
    }

    pub fn update_code_files(&self) -> Result<CategoryReport> {
        self.update(Category::Code)
    }

    pub fn update_test_files(&self) -> Result<CategoryReport> {
        self.update(Category::Tests)
    }

    /// Only the docs config file is updated.
    pub fn update_doc_files(&self) -> Result<CategoryReport> {
        self.update(Category::Docs)
    }

    pub fn update_include_files(&self) -> Result<CategoryReport> {
        self.update(Category::Includes)
    }

    /// Package-index files listed under `index.files`; a no-op when none are configured.
    pub fn update_index_files(&self) -> Result<CategoryReport> {
        self.update(Category::Index)
    }

    /// Run every category in order, stopping at the first error.
    pub fn update_all(&self) -> Result<UpdateRun> {
        let mut categories = Vec::new();
        for category in Category::RUN_ORDER {
            categories.push(self.update(category)?);
        }

        Ok(UpdateRun {
            rootdir: self.layout.root().display().to_string(),
            version: self.version.full().to_string(),
            version_short: self.version.short().to_string(),
            is_release: self.version.is_release(),
            mock_run: self.options.mock_run,
            summary: RunSummary::from_reports(&categories),
            categories,
        })
    }

    fn update(&self, category: Category) -> Result<CategoryReport> {
        let classifier = FileClassifier::new(&self.layout, &self.config);
        let service = FileUpdateService::new(
            RuleContext {
                version: &self.version,
                markers: &self.config.markers,
                index: &self.config.index,
            },
            self.options,
        );

        if self.options.verbose {
            log_status!("update", "Updating {} files", category.as_str());
        }
        service.process_category(&classifier, category)
    }
}

fn resolve_root(rootdir: Option<&str>) -> PathBuf {
    match rootdir.map(str::trim).filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(shellexpand::tilde(dir).as_ref()),
        None => PathBuf::from("."),
    }
}
