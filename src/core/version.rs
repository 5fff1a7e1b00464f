use serde::Serialize;

use crate::error::Result;
use crate::utils::validation;

/// Target version values every rewrite rule reads from.
///
/// The full version is split on `.` into components without any parsing, so
/// pre-release tags such as `3.0a2` pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSpec {
    full: String,
    short: String,
    components: Vec<String>,
    is_release: bool,
}

impl VersionSpec {
    pub fn new(full: &str, short: Option<&str>, is_release: bool) -> Result<Self> {
        validation::require_non_empty(full, "version", "Version cannot be empty")?;

        Ok(Self {
            full: full.to_string(),
            short: short.unwrap_or_default().to_string(),
            components: full.split('.').map(String::from).collect(),
            is_release,
        })
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Accepted and reported, but no rewrite rule consults it.
    pub fn is_release(&self) -> bool {
        self.is_release
    }

    /// Components rendered as a Python tuple of strings, e.g. `('3', '0a2')`.
    /// A single component keeps the trailing comma: `('3',)`.
    pub fn tuple_literal(&self) -> String {
        let items: Vec<String> = self.components.iter().map(|c| py_str_repr(c)).collect();

        if items.len() == 1 {
            format!("({},)", items[0])
        } else {
            format!("({})", items.join(", "))
        }
    }
}

/// Python `repr()` of a str: single quotes unless the value contains a single
/// quote and no double quote. Backslashes, the chosen quote and control
/// characters are escaped; other characters are kept as they are.
fn py_str_repr(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
