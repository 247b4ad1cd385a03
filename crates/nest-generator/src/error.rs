//! Error types for the nest-generator crate.
//!
//! This module provides the [`GenerateError`] type for failures while
//! planning or executing a manifest.

use std::fmt;

use camino::Utf8PathBuf;
use nest_core::ConfigError;

/// What kind of existing artifact a collision was detected against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    /// A class or module with the planned name already exists.
    Class,
    /// A destination file exists with different content.
    File,
    /// A migration with the same name exists.
    Migration,
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Class => "class",
            Self::File => "file",
            Self::Migration => "migration",
        })
    }
}

/// Errors that can occur while generating a scaffold.
///
/// # Error Recovery Strategy
///
/// None of these are retried. Configuration and template errors happen
/// before anything is written. A collision stops the run at the offending
/// entry; earlier entries stay written.
///
/// # Examples
///
/// ```
/// use nest_generator::{CollisionKind, GenerateError};
///
/// let err = GenerateError::collision(CollisionKind::Class, "Category");
/// assert!(err.is_collision());
/// assert!(err.to_string().contains("Category"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Invalid input or configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A planned class, file, or migration already exists.
    #[error("{}", collision_message(*kind, target))]
    Collision {
        /// What was collided with.
        kind: CollisionKind,
        /// The class name or path that collided.
        target: String,
    },

    /// An embedded template failed to compile.
    #[error("invalid template '{template}': {source}")]
    Template {
        /// Template name.
        template: &'static str,
        /// The underlying compile error.
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A template failed to render.
    #[error("failed to render template '{template}': {source}")]
    Render {
        /// Template name.
        template: &'static str,
        /// The underlying render error.
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// Template variables could not be serialized.
    #[error("failed to build template variables: {0}")]
    Context(#[from] serde_json::Error),

    /// The routes file is missing or has no draw block.
    #[error("cannot update routes in {path}: {reason}")]
    Routes {
        /// The routes file path.
        path: Utf8PathBuf,
        /// Explanation of the failure.
        reason: String,
    },

    /// A filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The path being read or written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to walk the application tree.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

fn collision_message(kind: CollisionKind, target: &str) -> String {
    match kind {
        CollisionKind::Class => format!(
            "The name '{target}' is either already used in your application or reserved. \
             Please choose an alternative and run this generator again."
        ),
        CollisionKind::File => format!(
            "{target} already exists with different content (use --force to overwrite or --skip to keep it)"
        ),
        CollisionKind::Migration => format!("Another migration is already named {target}"),
    }
}

impl GenerateError {
    /// Creates a new [`GenerateError::Collision`] error.
    #[inline]
    pub fn collision(kind: CollisionKind, target: impl Into<String>) -> Self {
        Self::Collision {
            kind,
            target: target.into(),
        }
    }

    /// Creates a new [`GenerateError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`GenerateError::Routes`] error.
    #[inline]
    pub fn routes(path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        Self::Routes {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error is a naming or path collision.
    #[inline]
    #[must_use]
    pub const fn is_collision(&self) -> bool {
        matches!(self, Self::Collision { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_class_collision_message() {
        let err = GenerateError::collision(CollisionKind::Class, "Admin::ReportsController");
        assert!(err.is_collision());
        assert!(err.to_string().starts_with("The name 'Admin::ReportsController'"));
    }

    #[test]
    fn test_file_collision_message() {
        let err = GenerateError::collision(CollisionKind::File, "app/models/category.rb");
        let msg = err.to_string();
        assert!(msg.contains("app/models/category.rb"));
        assert!(msg.contains("--force"));
    }

    #[test]
    fn test_migration_collision_message() {
        let err = GenerateError::collision(CollisionKind::Migration, "create_categories");
        assert_eq!(
            err.to_string(),
            "Another migration is already named create_categories"
        );
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = GenerateError::from(ConfigError::MissingOption { option: "owner" });
        assert!(!err.is_collision());
        assert!(err.to_string().contains("--owner"));
    }

    #[test]
    fn test_io_error_display() {
        let err = GenerateError::io(
            "app/models/category.rb",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_collision());
        assert!(err.to_string().contains("app/models/category.rb"));
    }
}
