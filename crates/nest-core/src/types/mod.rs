//! Domain types for the nest-scaffold generator.
//!
//! # Module Organization
//!
//! - [`attribute`] - `field:type` pairs and their resolved defaults
//! - [`names`] - the Name Deriver and [`DerivedNames`]
//! - [`resource`] - the user's request
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use nest_core::{Attribute, DerivedNames, ResourceSpec};
//! ```

pub mod attribute;
pub mod names;
pub mod resource;

pub use attribute::{Attribute, InputKind};
pub use names::{ClassPath, DerivedNames, NAMESPACE_SEPARATOR, derive};
pub use resource::ResourceSpec;
