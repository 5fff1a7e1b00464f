use clap::Args;
use serde::Serialize;

use verstamp::utils::validation;
use verstamp::{UpdateRun, UpdaterOptions, VersionUpdater};

use super::CmdResult;

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Root directory for the project
    #[arg(short = 'd', long)]
    pub rootdir: Option<String>,

    /// New version (e.g., 3.0a2)
    #[arg(short = 'v', long)]
    pub version: Option<String>,

    /// Short version written to the docs `version` key (e.g., 3.0)
    #[arg(short = 's', long, visible_alias = "version_short")]
    pub version_short: Option<String>,

    /// Mark this as a release build (accepted, not used by any rewrite)
    #[arg(long, visible_alias = "is_release")]
    pub is_release: bool,

    /// Report each file as it is read and written
    #[arg(long)]
    pub verbose: bool,

    /// Detect and report changes without writing any file
    #[arg(short = 'm', long, visible_alias = "mock_run")]
    pub mock_run: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateOutput {
    pub command: &'static str,
    #[serde(flatten)]
    pub run: UpdateRun,
}

pub fn run(args: UpdateArgs) -> CmdResult<UpdateOutput> {
    // Checked before anything touches the filesystem.
    let version = validation::require(args.version.filter(|v| !v.trim().is_empty()), "version")
        .map_err(|e| e.with_hint("Provide the new version: verstamp --version 3.0a2"))?;

    crate::tty::status("verstamp is working...");

    let updater = VersionUpdater::new(UpdaterOptions {
        rootdir: args.rootdir,
        version,
        version_short: args.version_short,
        is_release: args.is_release,
        verbose: args.verbose,
        mock_run: args.mock_run,
    })?;

    let run = updater.update_all()?;

    Ok((
        UpdateOutput {
            command: "update",
            run,
        },
        0,
    ))
}
