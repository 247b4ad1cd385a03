//! Scaffold planning and emission for nest-scaffold.
//!
//! This crate turns a [`ResourceSpec`](nest_core::ResourceSpec) into files
//! on disk in two steps:
//!
//! 1. [`build_manifest`] plans every directory, template, migration, and
//!    route for a nested resource, without side effects.
//! 2. [`Generator`] executes a [`Manifest`], checking for class and file
//!    collisions and reporting one [`ActionReport`] per entry.
//!
//! # Example
//!
//! ```no_run
//! use nest_core::{GeneratorConfig, ResourceSpec};
//! use nest_generator::{Generator, Mode};
//!
//! let generator = Generator::new(GeneratorConfig::default())?;
//! let spec = ResourceSpec::new("admin/report", Some("account"))
//!     .with_attributes(["title:string", "body:text"]);
//!
//! let manifest = generator.plan(&spec)?;
//! generator.run_with(&manifest, Mode::Create, |report| println!("{report}"))?;
//! # Ok::<(), nest_generator::GenerateError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ResourceSpec ──derive──▶ DerivedNames ──build_manifest──▶ Manifest
//!                                                            │
//!                           Generator::run_with ◀────────────┘
//!                               │
//!                               ├── ClassIndex (app/, lib/ via ignore)
//!                               ├── Renderer (handlebars, embedded templates)
//!                               └── routes (config/routes.rb edits)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod collision;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod routes;
pub mod templates;

pub use collision::ClassIndex;
pub use error::{CollisionKind, GenerateError};
pub use generator::{ActionReport, ActionStatus, Generator, Mode};
pub use manifest::{Manifest, ManifestEntry, ManifestOptions, build_manifest};
pub use routes::{ROUTES_SENTINEL, RouteEdit};
pub use templates::{Assigns, Renderer, ScaffoldView, TemplateId};
