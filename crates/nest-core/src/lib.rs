//! Core types, errors, and configuration for the nest-scaffold generator.
//!
//! This crate provides the values every other crate works from:
//!
//! - [`ResourceSpec`] - what the user asked for (name, owner, attributes)
//! - [`DerivedNames`] - every identifier the templates need, derived once
//! - [`Attribute`] - a `field:type` pair with its resolved defaults
//! - [`GeneratorConfig`] - settings loaded from file and CLI
//! - [`ConfigError`] - configuration failures
//!
//! # Examples
//!
//! ```
//! use nest_core::derive;
//!
//! let names = derive("admin/report", Some("accounts"))?;
//! assert_eq!(names.class_name, "Admin::Report");
//! assert_eq!(names.controller_file_path, "admin/reports");
//! assert_eq!(names.nesting_owner, "account");
//! # Ok::<(), nest_core::ConfigError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{CollisionPolicy, EditPathStyle, GeneratorConfig};
pub use error::ConfigError;
pub use nest_inflect::{Inflector, Locale};
pub use types::{Attribute, DerivedNames, InputKind, ResourceSpec, derive};
