//! Input validation primitives.
//!
//! Replace verbose `ok_or_else` + `Error::validation_*` chains at call sites.

use crate::error::{Error, Result};

/// Require an Option to contain a value, reporting the argument as missing otherwise.
pub fn require<T>(opt: Option<T>, field: &str) -> Result<T> {
    opt.ok_or_else(|| Error::validation_missing_argument(vec![field.to_string()]))
}

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message))
    } else {
        Ok(trimmed)
    }
}

/// Require a configuration value to be non-empty.
///
/// Line matching is prefix based, so an empty marker would match every line.
pub fn require_config_value(value: &str, key: &str) -> Result<()> {
    if value.is_empty() {
        Err(Error::config_invalid_value(
            key,
            Some(value.to_string()),
            "Value cannot be empty",
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_returns_value_when_some() {
        assert_eq!(require(Some("3.0a2"), "version").unwrap(), "3.0a2");
    }

    #[test]
    fn require_reports_missing_argument_when_none() {
        let err = require::<&str>(None, "version").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.missing_argument");
        assert_eq!(err.details["args"][0], "version");
    }

    #[test]
    fn require_non_empty_trims_whitespace() {
        let result = require_non_empty("  3.0  ", "version", "msg");
        assert_eq!(result.unwrap(), "3.0");
    }

    #[test]
    fn require_non_empty_fails_for_whitespace_only() {
        let err = require_non_empty("   ", "version", "Cannot be empty").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(
            err.details,
            serde_json::json!({"field": "version", "problem": "Cannot be empty"})
        );
    }

    #[test]
    fn require_config_value_rejects_empty() {
        let err = require_config_value("", "markers.versionMacro").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "markers.versionMacro");
        assert!(require_config_value("__version__", "markers.versionIdentifier").is_ok());
    }
}
