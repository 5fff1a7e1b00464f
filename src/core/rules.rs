//! Line rewrite rules, one per file type.
//!
//! Every rule scans a line buffer top to bottom with plain prefix or
//! substring checks, replaces the first matching line, and reports what it
//! touched. A miss is never an error: the outcome lists the missing keys and
//! the caller leaves the file alone. The `missing` list in the report is the
//! record of a miss; the stderr diagnostic only appears when stderr is a
//! terminal.
//!
//! A rewritten line keeps its own terminator, so CRLF files stay CRLF.
//!
//! Rules are looked up through a static table per category, so a file type a
//! category does not expect has no rule and dispatch reports it.

use serde::Serialize;
use std::path::Path;

use crate::classify::{Category, FileType};
use crate::defaults::{IndexConfig, MarkerConfig};
use crate::version::VersionSpec;

/// Read-only inputs shared by every rule invocation in a run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub version: &'a VersionSpec,
    pub markers: &'a MarkerConfig,
    pub index: &'a IndexConfig,
}

/// One rewritten line. `line` is 1-based; `before`/`after` exclude the terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEdit {
    pub key: String,
    pub line: usize,
    pub before: String,
    pub after: String,
}

impl LineEdit {
    /// True when the replacement differs from what was there (false on a re-run).
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOutcome {
    pub edits: Vec<LineEdit>,
    pub missing: Vec<String>,
}

impl RewriteOutcome {
    /// Whether anything was rewritten, i.e. whether the file should be written back.
    pub fn found(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Replace line `idx` with `body`, keeping the line's own terminator.
    fn replace(&mut self, lines: &mut [String], idx: usize, key: &str, body: String) {
        let terminator = terminator_of(&lines[idx]);
        self.edits.push(LineEdit {
            key: key.to_string(),
            line: idx + 1,
            before: strip_terminator(&lines[idx]).to_string(),
            after: body.clone(),
        });
        lines[idx] = body + terminator;
    }

    fn miss(&mut self, key: &str) {
        self.missing.push(key.to_string());
    }
}

pub type RuleFn = fn(&mut [String], &Path, &RuleContext<'_>) -> RewriteOutcome;

#[derive(Clone, Copy)]
pub struct Rule {
    pub file_type: FileType,
    pub name: &'static str,
    pub apply: RuleFn,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("file_type", &self.file_type)
            .field("name", &self.name)
            .finish()
    }
}

const IDENTIFIER: Rule = Rule {
    file_type: FileType::InterpretedSource,
    name: "version_identifier",
    apply: rewrite_identifier,
};

const IDENTIFIER_TUPLE: Rule = Rule {
    file_type: FileType::ExtensionSource,
    name: "version_identifier_tuple",
    apply: rewrite_identifier_tuple,
};

const NATIVE_SOURCE_MACRO: Rule = Rule {
    file_type: FileType::NativeSource,
    name: "version_macro",
    apply: rewrite_macro,
};

const NATIVE_HEADER_MACRO: Rule = Rule {
    file_type: FileType::NativeHeader,
    name: "version_macro",
    apply: rewrite_macro,
};

const DOCS_CONF: Rule = Rule {
    file_type: FileType::DocsConfig,
    name: "docs_conf",
    apply: rewrite_docs_conf,
};

const PACKAGE_INDEX: Rule = Rule {
    file_type: FileType::Config,
    name: "package_index",
    apply: rewrite_package_index,
};

static CODE_RULES: [Rule; 3] = [IDENTIFIER, IDENTIFIER_TUPLE, NATIVE_SOURCE_MACRO];
static TEST_RULES: [Rule; 1] = [IDENTIFIER];
static DOC_RULES: [Rule; 1] = [DOCS_CONF];
static INCLUDE_RULES: [Rule; 2] = [IDENTIFIER_TUPLE, NATIVE_HEADER_MACRO];
static INDEX_RULES: [Rule; 1] = [PACKAGE_INDEX];

/// The rule table for a category.
pub fn rules(category: Category) -> &'static [Rule] {
    match category {
        Category::Code => &CODE_RULES,
        Category::Tests => &TEST_RULES,
        Category::Docs => &DOC_RULES,
        Category::Includes => &INCLUDE_RULES,
        Category::Index => &INDEX_RULES,
    }
}

/// Look up the rule for a file type within a category's table.
pub fn dispatch(category: Category, file_type: FileType) -> Option<&'static Rule> {
    rules(category).iter().find(|rule| rule.file_type == file_type)
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// CRLF lines stay CRLF; everything else, including a final line with no
/// terminator, ends in `\n` after a rewrite.
fn terminator_of(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

fn first_line(lines: &[String], pred: impl Fn(&str) -> bool) -> Option<usize> {
    lines.iter().position(|line| pred(line))
}

/// Rewrite the first line starting with `prefix`, recording a miss otherwise.
fn replace_first_prefixed(
    lines: &mut [String],
    prefix: &str,
    key: &str,
    replacement: String,
) -> RewriteOutcome {
    let mut outcome = RewriteOutcome::default();
    match first_line(lines, |line| line.starts_with(prefix)) {
        Some(idx) => outcome.replace(lines, idx, key, replacement),
        None => outcome.miss(key),
    }
    outcome
}

/// `__version__ = "<full>"`
pub fn rewrite_identifier(
    lines: &mut [String],
    _path: &Path,
    ctx: &RuleContext<'_>,
) -> RewriteOutcome {
    let marker = &ctx.markers.version_identifier;
    let replacement = format!("{} = \"{}\"", marker, ctx.version.full());
    replace_first_prefixed(lines, marker, marker, replacement)
}

/// `__version__ = "('3', '0a2')"`
pub fn rewrite_identifier_tuple(
    lines: &mut [String],
    _path: &Path,
    ctx: &RuleContext<'_>,
) -> RewriteOutcome {
    let marker = &ctx.markers.version_identifier;
    let replacement = format!("{} = \"{}\"", marker, ctx.version.tuple_literal());
    replace_first_prefixed(lines, marker, marker, replacement)
}

/// `#define PYCOGENT_VERSION "<full>"`
pub fn rewrite_macro(lines: &mut [String], _path: &Path, ctx: &RuleContext<'_>) -> RewriteOutcome {
    let prefix = format!("#define {}", ctx.markers.version_macro);
    let replacement = format!("{} \"{}\"", prefix, ctx.version.full());
    replace_first_prefixed(lines, &prefix, &ctx.markers.version_macro, replacement)
}

/// Sphinx conf: `version` gets the short version, `release` the full one.
///
/// The two keys are located independently; the scan stops once both have
/// been seen, and either one may be absent without affecting the other.
pub fn rewrite_docs_conf(
    lines: &mut [String],
    _path: &Path,
    ctx: &RuleContext<'_>,
) -> RewriteOutcome {
    let version_key = ctx.markers.docs_version_key.as_str();
    let release_key = ctx.markers.docs_release_key.as_str();

    let mut version_line = None;
    let mut release_line = None;
    for (idx, line) in lines.iter().enumerate() {
        if version_line.is_none() && line.starts_with(version_key) {
            version_line = Some(idx);
        }
        if release_line.is_none() && line.starts_with(release_key) {
            release_line = Some(idx);
        }
        if version_line.is_some() && release_line.is_some() {
            break;
        }
    }

    let mut outcome = RewriteOutcome::default();
    let targets = [
        (version_line, version_key, ctx.version.short()),
        (release_line, release_key, ctx.version.full()),
    ];
    for (found, key, value) in targets {
        match found {
            Some(idx) => outcome.replace(lines, idx, key, format!("{} = \"{}\"", key, value)),
            None => outcome.miss(key),
        }
    }
    outcome
}

/// Package-index download line: keep everything up to the last `/`, then
/// append `/<PackageName>-<full>.tgz`. Files not named like the index file
/// are never scanned.
pub fn rewrite_package_index(
    lines: &mut [String],
    path: &Path,
    ctx: &RuleContext<'_>,
) -> RewriteOutcome {
    let index = ctx.index;
    let mut outcome = RewriteOutcome::default();

    let is_index_file = path.to_string_lossy().ends_with(index.file_suffix.as_str());
    let found = if is_index_file {
        first_line(lines, |line| line.contains(index.package_path.as_str()))
    } else {
        None
    };

    match found {
        Some(idx) => {
            let base = lines[idx]
                .rsplit_once('/')
                .map(|(base, _)| base)
                .unwrap_or(lines[idx].as_str());
            let replacement = format!(
                "{}/{}-{}.tgz",
                base,
                index.package_name,
                ctx.version.full()
            );
            outcome.replace(lines, idx, &index.package_path, replacement);
        }
        None => outcome.miss(&index.package_path),
    }
    outcome
}
