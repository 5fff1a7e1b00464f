use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::{io, validation};

/// Per-project config file, looked up in the root directory.
pub const CONFIG_FILE: &str = "verstamp.json";

/// Root configuration structure for verstamp.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VerstampConfig {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub markers: MarkerConfig,

    #[serde(default)]
    pub suffixes: SuffixConfig,

    #[serde(default)]
    pub index: IndexConfig,
}

/// Directories and marker files under the root directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(default = "default_code_dir")]
    pub code_dir: String,

    #[serde(default = "default_tests_dir")]
    pub tests_dir: String,

    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    #[serde(default = "default_includes_dir")]
    pub includes_dir: String,

    /// File that must exist in both the code and tests directories
    #[serde(default = "default_package_marker")]
    pub package_marker: String,

    /// Documentation config file inside the docs directory
    #[serde(default = "default_docs_conf")]
    pub docs_conf: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            code_dir: default_code_dir(),
            tests_dir: default_tests_dir(),
            docs_dir: default_docs_dir(),
            includes_dir: default_includes_dir(),
            package_marker: default_package_marker(),
            docs_conf: default_docs_conf(),
        }
    }
}

/// Line prefixes that identify version-bearing lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerConfig {
    pub version_identifier: String,
    pub version_macro: String,
    pub docs_version_key: String,
    pub docs_release_key: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            version_identifier: "__version__".to_string(),
            version_macro: "PYCOGENT_VERSION".to_string(),
            docs_version_key: "version".to_string(),
            docs_release_key: "release".to_string(),
        }
    }
}

/// Filename suffixes used for classification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuffixConfig {
    pub interpreted_source: String,
    pub extension_source: String,
    pub native_source: String,
    pub native_header: String,
}

impl Default for SuffixConfig {
    fn default() -> Self {
        Self {
            interpreted_source: ".py".to_string(),
            extension_source: ".pyx".to_string(),
            native_source: ".c".to_string(),
            native_header: ".h".to_string(),
        }
    }
}

/// Package-index files whose download URL embeds the version
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexConfig {
    /// Paths relative to the root directory
    pub files: Vec<String>,
    /// Only files whose name ends with this are rewritten
    pub file_suffix: String,
    pub package_path: String,
    pub package_name: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            file_suffix: "cogent3-requirements.txt".to_string(),
            package_path: "packages/source/c/cogent3".to_string(),
            package_name: "PyCogent".to_string(),
        }
    }
}

fn default_code_dir() -> String {
    "src/cogent3".to_string()
}

fn default_tests_dir() -> String {
    "tests".to_string()
}

fn default_docs_dir() -> String {
    "doc".to_string()
}

fn default_includes_dir() -> String {
    "src/include".to_string()
}

fn default_package_marker() -> String {
    "__init__.py".to_string()
}

fn default_docs_conf() -> String {
    "conf.py".to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load verstamp.json from the root directory.
/// A missing file yields built-in defaults; a malformed one is an error.
pub fn load_config(root: &Path) -> Result<VerstampConfig> {
    let path = root.join(CONFIG_FILE);

    if !path.is_file() {
        return Ok(VerstampConfig::default());
    }

    let content = io::read_file(&path, &format!("read {}", CONFIG_FILE))?;
    let config: VerstampConfig = serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

    validate_config(&config)?;
    Ok(config)
}

/// Reject empty markers and suffixes.
pub fn validate_config(config: &VerstampConfig) -> Result<()> {
    let checks = [
        (&config.layout.package_marker, "layout.packageMarker"),
        (&config.layout.docs_conf, "layout.docsConf"),
        (&config.markers.version_identifier, "markers.versionIdentifier"),
        (&config.markers.version_macro, "markers.versionMacro"),
        (&config.markers.docs_version_key, "markers.docsVersionKey"),
        (&config.markers.docs_release_key, "markers.docsReleaseKey"),
        (&config.suffixes.interpreted_source, "suffixes.interpretedSource"),
        (&config.suffixes.extension_source, "suffixes.extensionSource"),
        (&config.suffixes.native_source, "suffixes.nativeSource"),
        (&config.suffixes.native_header, "suffixes.nativeHeader"),
        (&config.index.file_suffix, "index.fileSuffix"),
        (&config.index.package_path, "index.packagePath"),
        (&config.index.package_name, "index.packageName"),
    ];

    for (value, key) in checks {
        validation::require_config_value(value, key)?;
    }

    Ok(())
}
