// Public modules
pub mod classify;
pub mod defaults;
pub mod error;
pub mod layout;
pub mod output;
pub mod rules;
pub mod update;
pub mod updater;
pub mod version;

// Re-export common types for convenience
pub use classify::{Category, FileClassifier, FileDescriptor, FileType};
pub use error::{Error, ErrorCode, Result};
pub use output::{CategoryReport, FileOutcome, FileStatus, RunSummary, UpdateRun};
pub use updater::{UpdaterOptions, VersionUpdater};
pub use version::VersionSpec;
