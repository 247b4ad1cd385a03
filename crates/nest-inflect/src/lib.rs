//! English inflection rules for the nest-scaffold generator.
//!
//! This crate provides the word transforms that drive every derived name in
//! a generated scaffold:
//!
//! - Number inflection ([`Inflector::pluralize`], [`Inflector::singularize`])
//! - Case conversion ([`camelize`], [`underscore`], [`capitalize`], [`humanize`])
//! - Constant helpers ([`Inflector::classify`], [`demodulize`])
//!
//! # Examples
//!
//! ```
//! use nest_inflect::{Inflector, Locale, camelize};
//!
//! let inflector = Inflector::new(Locale::EnUs);
//! assert_eq!(inflector.pluralize("category"), "categories");
//! assert_eq!(inflector.singularize("people"), "person");
//! assert_eq!(camelize("admin/report_card"), "Admin::ReportCard");
//! ```
//!
//! # Idempotence
//!
//! Pluralizing a word that is already plural returns it unchanged, and the
//! same holds for singularizing a singular word:
//!
//! ```
//! use nest_inflect::{Inflector, Locale};
//!
//! let inflector = Inflector::new(Locale::EnUs);
//! assert_eq!(inflector.pluralize("categories"), "categories");
//! assert_eq!(inflector.pluralize("sheep"), "sheep");
//! assert_eq!(inflector.singularize("category"), "category");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod case;
mod inflector;
mod rules;

pub use case::{camelize, capitalize, demodulize, humanize, underscore};
pub use inflector::{Inflector, Locale};
