//! Configuration structures for the nest-scaffold generator.
//!
//! This module provides:
//!
//! - [`EditPathStyle`] - how edit routes are spelled in generated views
//! - [`CollisionPolicy`] - what to do when a destination file already exists
//! - [`GeneratorConfig`] - root configuration combining all settings
//!
//! All configuration types implement [`Default`] with values matching a
//! conventional application layout, and can be loaded from a JSON file.

use camino::{Utf8Path, Utf8PathBuf};
use nest_inflect::{Inflector, Locale};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Suffix used to build edit paths in generated views and specs.
///
/// Older routing conventions separated the edit action with `;` rather
/// than `/`. The choice is made once, in configuration.
///
/// # Examples
///
/// ```
/// use nest_core::EditPathStyle;
///
/// assert_eq!(EditPathStyle::Slash.suffix(), "/edit");
/// assert_eq!(EditPathStyle::Semicolon.suffix(), ";edit");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPathStyle {
    /// `/edit`, the resource action separator form.
    #[default]
    Slash,
    /// `;edit`, the legacy form.
    Semicolon,
}

impl EditPathStyle {
    /// Returns the literal suffix appended to a member path.
    #[inline]
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Slash => "/edit",
            Self::Semicolon => ";edit",
        }
    }
}

/// What the generator does when a destination file already exists with
/// different content.
///
/// Identical content is never treated as a collision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Stop and report a collision; nothing after it is generated.
    #[default]
    Abort,
    /// Overwrite the existing file.
    Force,
    /// Leave the existing file untouched and continue.
    Skip,
}

/// Root configuration for the generator.
///
/// # Examples
///
/// ```
/// use nest_core::{CollisionPolicy, EditPathStyle, GeneratorConfig};
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.default_file_extension, "html.erb");
/// assert_eq!(config.edit_path, EditPathStyle::Slash);
/// assert_eq!(config.collision, CollisionPolicy::Abort);
/// assert_eq!(config.routes_file, "config/routes.rb");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root of the application tree files are generated into.
    pub destination_root: Utf8PathBuf,

    /// Inflection rules used for every derived name.
    pub locale: Locale,

    /// Extension of generated view templates.
    pub default_file_extension: String,

    /// Spelling of edit paths.
    pub edit_path: EditPathStyle,

    /// Handling of existing destination files.
    pub collision: CollisionPolicy,

    /// Report planned actions without writing anything.
    pub pretend: bool,

    /// Routes file, relative to `destination_root`.
    pub routes_file: Utf8PathBuf,

    /// Migrations directory, relative to `destination_root`.
    pub migrations_dir: Utf8PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            destination_root: Utf8PathBuf::from("."),
            locale: Locale::default(),
            default_file_extension: "html.erb".to_owned(),
            edit_path: EditPathStyle::default(),
            collision: CollisionPolicy::default(),
            pretend: false,
            routes_file: Utf8PathBuf::from("config/routes.rb"),
            migrations_dir: Utf8PathBuf::from("db/migrate"),
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON for this structure,
    /// and [`ConfigError::InvalidOption`] if a value fails validation.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extension = &self.default_file_extension;
        if extension.is_empty() || extension.starts_with('.') || extension.contains('/') {
            return Err(ConfigError::InvalidOption {
                option: "default_file_extension".to_owned(),
                reason: format!("'{extension}' is not a bare file extension"),
            });
        }
        if self.routes_file.as_str().is_empty() {
            return Err(ConfigError::InvalidOption {
                option: "routes_file".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        if self.migrations_dir.is_absolute() {
            return Err(ConfigError::InvalidOption {
                option: "migrations_dir".to_owned(),
                reason: "must be relative to destination_root".to_owned(),
            });
        }
        Ok(())
    }

    /// Returns an inflector for the configured locale.
    #[inline]
    #[must_use]
    pub fn inflector(&self) -> Inflector {
        Inflector::new(self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.destination_root, ".");
        assert_eq!(config.migrations_dir, "db/migrate");
        assert!(!config.pretend);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let json = r#"{"edit_path": "semicolon", "collision": "skip"}"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.edit_path, EditPathStyle::Semicolon);
        assert_eq!(config.collision, CollisionPolicy::Skip);
        assert_eq!(config.default_file_extension, "html.erb");
        assert_eq!(config.locale, Locale::EnUs);
    }

    #[test]
    fn test_config_serialization() {
        let config = GeneratorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GeneratorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let config = GeneratorConfig {
            default_file_extension: ".html.erb".to_owned(),
            ..GeneratorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_file_extension"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("nest.json")).unwrap();
        std::fs::write(&path, r#"{"default_file_extension": "html.haml"}"#).unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.default_file_extension, "html.haml");
    }

    #[test]
    fn test_load_missing_file() {
        let err = GeneratorConfig::load(Utf8Path::new("/nonexistent/nest.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/nest.json"));
    }

    #[test]
    fn test_load_rejects_unknown_locale() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("nest.json")).unwrap();
        std::fs::write(&path, r#"{"locale": "de-DE"}"#).unwrap();

        let err = GeneratorConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
