//! Error types for the nest-core crate.
//!
//! This module provides the [`ConfigError`] type for failures detected before
//! any file is written: missing required options, unusable names, and
//! configuration files that cannot be read.

use camino::Utf8PathBuf;

/// Errors that can occur while validating input and loading configuration.
///
/// Every variant is fatal: generation aborts before touching the
/// destination tree.
///
/// # Examples
///
/// ```
/// use nest_core::ConfigError;
///
/// let error = ConfigError::MissingOption { option: "owner" };
/// assert!(error.to_string().contains("--owner"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required command-line option was not supplied.
    #[error("you must specify the --{option} option. See --help")]
    MissingOption {
        /// The long name of the option, without leading dashes.
        option: &'static str,
    },

    /// The resource name cannot be turned into class and file names.
    #[error("invalid resource name '{name}': {reason}")]
    InvalidName {
        /// The name as supplied.
        name: String,
        /// Explanation of why the name is invalid.
        reason: String,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidName`] error.
    #[inline]
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_option_names_the_flag() {
        let error = ConfigError::MissingOption { option: "owner" };
        assert_eq!(
            error.to_string(),
            "you must specify the --owner option. See --help"
        );
    }

    #[test]
    fn test_invalid_name_display() {
        let error = ConfigError::invalid_name("admin//report", "empty module segment");
        let msg = error.to_string();
        assert!(msg.contains("admin//report"));
        assert!(msg.contains("empty module segment"));
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::InvalidOption {
            option: "default_file_extension".to_owned(),
            reason: "must not be empty".to_owned(),
        };
        let msg = error.to_string();
        assert!(msg.contains("default_file_extension"));
        assert!(msg.contains("must not be empty"));
    }
}
