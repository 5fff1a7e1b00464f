//! File enumeration and type tagging per category.
//!
//! Classification looks at the filename suffix only; file contents are never
//! inspected. Each category owns a suffix table, checked in order, and files
//! matching no entry are skipped.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::defaults::VerstampConfig;
use crate::layout::RootLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Code,
    Tests,
    Docs,
    Includes,
    Index,
}

impl Category {
    /// Order in which a full run processes categories.
    pub const RUN_ORDER: [Category; 5] = [
        Category::Code,
        Category::Tests,
        Category::Docs,
        Category::Includes,
        Category::Index,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Code => "code",
            Category::Tests => "tests",
            Category::Docs => "docs",
            Category::Includes => "includes",
            Category::Index => "index",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    /// `.py`
    InterpretedSource,
    /// `.pyx`
    ExtensionSource,
    /// `.c`
    NativeSource,
    /// `.h`
    NativeHeader,
    /// Package-index file carrying a download URL
    Config,
    /// Sphinx `conf.py`
    DocsConfig,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::InterpretedSource => "interpreted_source",
            FileType::ExtensionSource => "extension_source",
            FileType::NativeSource => "native_source",
            FileType::NativeHeader => "native_header",
            FileType::Config => "config",
            FileType::DocsConfig => "docs_config",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub file_type: FileType,
}

impl FileDescriptor {
    pub fn new(path: impl Into<PathBuf>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            file_type,
        }
    }
}

pub type SuffixTable = Vec<(String, FileType)>;

pub struct FileClassifier<'a> {
    layout: &'a RootLayout,
    config: &'a VerstampConfig,
}

impl<'a> FileClassifier<'a> {
    pub fn new(layout: &'a RootLayout, config: &'a VerstampConfig) -> Self {
        Self { layout, config }
    }

    /// Lazily enumerate the files of a category.
    pub fn enumerate(&self, category: Category) -> Box<dyn Iterator<Item = FileDescriptor> + 'a> {
        match category {
            Category::Code => walk(self.layout.code_dir(), self.suffix_table(category)),
            Category::Tests => walk(self.layout.tests_dir(), self.suffix_table(category)),
            Category::Includes => walk(self.layout.includes_dir(), self.suffix_table(category)),
            Category::Docs => Box::new(std::iter::once(FileDescriptor::new(
                self.layout.docs_conf(),
                FileType::DocsConfig,
            ))),
            Category::Index => {
                let root = self.layout.root();
                Box::new(
                    self.config
                        .index
                        .files
                        .iter()
                        .map(move |file| FileDescriptor::new(root.join(file), FileType::Config)),
                )
            }
        }
    }

    /// Suffix tables for the walked categories. Docs and index are fixed lists.
    pub fn suffix_table(&self, category: Category) -> SuffixTable {
        let s = &self.config.suffixes;
        let entries: Vec<(&String, FileType)> = match category {
            Category::Code => vec![
                (&s.interpreted_source, FileType::InterpretedSource),
                (&s.extension_source, FileType::ExtensionSource),
                (&s.native_source, FileType::NativeSource),
            ],
            Category::Tests => vec![(&s.interpreted_source, FileType::InterpretedSource)],
            Category::Includes => vec![
                (&s.extension_source, FileType::ExtensionSource),
                (&s.native_header, FileType::NativeHeader),
            ],
            Category::Docs | Category::Index => Vec::new(),
        };

        entries
            .into_iter()
            .map(|(suffix, file_type)| (suffix.clone(), file_type))
            .collect()
    }
}

/// First table entry whose suffix the filename ends with.
pub fn classify_name(name: &str, table: &[(String, FileType)]) -> Option<FileType> {
    table
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix.as_str()))
        .map(|(_, file_type)| *file_type)
}

/// Recursive walk. Entries that cannot be read (including the root itself
/// when it is missing) are skipped rather than reported.
fn walk<'a>(dir: &Path, table: SuffixTable) -> Box<dyn Iterator<Item = FileDescriptor> + 'a> {
    Box::new(
        WalkDir::new(dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| !entry.file_type().is_dir())
            .filter_map(move |entry| {
                let name = entry.file_name().to_string_lossy();
                let file_type = classify_name(&name, &table)?;
                Some(FileDescriptor::new(entry.into_path(), file_type))
            }),
    )
}
