use std::path::{Path, PathBuf};

use crate::defaults::LayoutConfig;
use crate::error::{Error, Result};
use crate::utils::io;

/// The four category directories under a project root.
///
/// Construction checks that the code and tests package markers and the docs
/// config file are readable; a layout value therefore always points at a
/// tree that looks like the expected project.
#[derive(Debug, Clone)]
pub struct RootLayout {
    root: PathBuf,
    code_dir: PathBuf,
    tests_dir: PathBuf,
    includes_dir: PathBuf,
    docs_conf: PathBuf,
}

impl RootLayout {
    pub fn resolve(root: &Path, config: &LayoutConfig) -> Result<Self> {
        let code_dir = root.join(&config.code_dir);
        let tests_dir = root.join(&config.tests_dir);
        let docs_dir = root.join(&config.docs_dir);
        let includes_dir = root.join(&config.includes_dir);
        let docs_conf = docs_dir.join(&config.docs_conf);

        require_marker(&code_dir, &config.package_marker)?;
        require_marker(&tests_dir, &config.package_marker)?;
        require_marker(&docs_dir, &config.docs_conf)?;

        Ok(Self {
            root: root.to_path_buf(),
            code_dir,
            tests_dir,
            includes_dir,
            docs_conf,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn code_dir(&self) -> &Path {
        &self.code_dir
    }

    pub fn tests_dir(&self) -> &Path {
        &self.tests_dir
    }

    /// Not validated: a project without native includes simply yields no files.
    pub fn includes_dir(&self) -> &Path {
        &self.includes_dir
    }

    pub fn docs_conf(&self) -> &Path {
        &self.docs_conf
    }
}

fn require_marker(dir: &Path, marker: &str) -> Result<()> {
    let path = dir.join(marker);
    io::check_readable(&path).map_err(|e| {
        Error::layout_marker_missing(
            marker_label(dir, marker),
            path.display().to_string(),
            e.to_string(),
        )
    })
}

/// `cogent3/__init__.py` style label: the directory's last component plus the marker.
fn marker_label(dir: &Path, marker: &str) -> String {
    match dir.file_name() {
        Some(name) => format!("{}/{}", name.to_string_lossy(), marker),
        None => marker.to_string(),
    }
}
