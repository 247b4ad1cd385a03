//! Discovery of constants already defined by the application.
//!
//! [`ClassIndex`] approximates "is this constant already defined?" without a
//! Ruby interpreter. It walks `app/` and `lib/` with the `ignore` crate and
//! records, for every `.rb` file:
//!
//! - the constant its path autoloads (`app/models/admin/report.rb` defines
//!   `Admin::Report`)
//! - every top-level `class` or `module` declaration in its source
//!
//! A short list of core Ruby and Rails constants is always considered taken.
//! Files the current manifest is about to write are left out, so that
//! regenerating a scaffold does not collide with itself; a hand-written file
//! at one of those paths is caught by the file collision check instead.

use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use nest_inflect::camelize;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::error::GenerateError;

/// Directories searched for Ruby sources.
const SOURCE_DIRECTORIES: &[&str] = &["app", "lib"];

/// Constants that exist in every application.
const RESERVED_CONSTANTS: &[&str] = &[
    "ActionController",
    "ActionView",
    "ActiveRecord",
    "ActiveSupport",
    "Application",
    "ApplicationController",
    "ApplicationHelper",
    "Array",
    "Class",
    "Comparable",
    "Date",
    "Dir",
    "Enumerable",
    "Exception",
    "File",
    "Hash",
    "Integer",
    "IO",
    "Kernel",
    "Module",
    "Object",
    "Proc",
    "Rails",
    "String",
    "Struct",
    "Symbol",
    "Time",
];

/// A column-zero `class Foo` or `module Foo::Bar` line.
static DECLARATION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:class|module)\s+([A-Z][A-Za-z0-9_]*(?:::[A-Z][A-Za-z0-9_]*)*)").ok()
});

/// The set of constants an application already defines.
///
/// # Examples
///
/// ```
/// use nest_generator::ClassIndex;
///
/// let mut index = ClassIndex::default();
/// assert!(index.contains("ApplicationController"));
///
/// index.insert("Admin::Report");
/// assert!(index.contains("Admin::Report"));
/// assert!(!index.contains("Report"));
/// ```
#[derive(Debug, Clone)]
pub struct ClassIndex {
    constants: FxHashSet<String>,
}

impl Default for ClassIndex {
    fn default() -> Self {
        Self {
            constants: RESERVED_CONSTANTS.iter().map(|&c| c.to_owned()).collect(),
        }
    }
}

impl ClassIndex {
    /// Scans `root/app` and `root/lib` for defined constants, ignoring the
    /// `planned` paths (relative to `root`).
    ///
    /// Missing source directories are skipped. Unreadable files are logged
    /// and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Walk`] if traversal fails, or
    /// [`GenerateError::NonUtf8Path`] for a path that is not UTF-8.
    pub fn scan(root: &Utf8Path, planned: &[&Utf8Path]) -> Result<Self, GenerateError> {
        let mut index = Self::default();

        for dir in SOURCE_DIRECTORIES {
            let source_root = root.join(dir);
            if !source_root.is_dir() {
                continue;
            }

            for result in WalkBuilder::new(&source_root)
                .standard_filters(true)
                .require_git(false)
                .build()
            {
                let entry = result?;
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }

                let path = Utf8Path::from_path(entry.path())
                    .ok_or_else(|| GenerateError::NonUtf8Path(entry.path().to_owned()))?;
                if path.extension() != Some("rb") {
                    continue;
                }

                if let Ok(relative) = path.strip_prefix(root) {
                    if planned.contains(&relative) {
                        continue;
                    }
                    if let Some(constant) = autoload_constant(relative) {
                        index.constants.insert(constant);
                    }
                }

                match std::fs::read_to_string(path) {
                    Ok(source) => index.extend_from_source(&source),
                    Err(e) => tracing::warn!(path = %path, error = %e, "Skipping unreadable file"),
                }
            }
        }

        tracing::debug!(constants = index.constants.len(), "Indexed defined constants");
        Ok(index)
    }

    /// Records the top-level declarations in a Ruby source.
    pub fn extend_from_source(&mut self, source: &str) {
        let Some(declaration) = DECLARATION.as_ref() else {
            return;
        };
        self.constants.extend(
            declaration
                .captures_iter(source)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_owned()),
        );
    }

    /// Records a constant.
    pub fn insert(&mut self, constant: impl Into<String>) {
        self.constants.insert(constant.into());
    }

    /// Returns `true` if the fully qualified constant is defined.
    #[inline]
    #[must_use]
    pub fn contains(&self, constant: &str) -> bool {
        self.constants.contains(constant)
    }

    /// The first of `class_names` that is already defined.
    #[must_use]
    pub fn first_collision<'a, S: AsRef<str>>(&self, class_names: &'a [S]) -> Option<&'a str> {
        class_names
            .iter()
            .map(|name| name.as_ref())
            .find(|name| self.contains(name))
    }
}

/// The constant a source file autoloads, relative to the application root.
///
/// `app/<kind>/x/y.rb` and `lib/x/y.rb` both define `X::Y`.
fn autoload_constant(relative: &Utf8Path) -> Option<String> {
    let mut components = relative.components().map(|c| c.as_str());
    let within: Utf8PathBuf = match components.next()? {
        "app" => {
            components.next()?;
            components.collect()
        }
        "lib" => components.collect(),
        _ => return None,
    };

    let stem = within.as_str().strip_suffix(".rb")?;
    if stem.is_empty() {
        return None;
    }
    Some(camelize(stem))
}
