//! The Manifest Builder: the ordered plan of operations for one scaffold.
//!
//! [`build_manifest`] turns [`DerivedNames`] into a [`Manifest`] without
//! touching the filesystem. Collisions are detected later, when the
//! manifest is executed.
//!
//! # Layout
//!
//! Controller, view, and their spec paths use the pluralized controller
//! path (`app/views/admin/reports/`). Model, fixture, and model spec paths
//! use the singular class path (`app/models/admin/report.rb`).
//!
//! # Examples
//!
//! ```
//! use nest_core::derive;
//! use nest_generator::{ManifestOptions, build_manifest};
//!
//! let names = derive("category", Some("site"))?;
//! let manifest = build_manifest(&names, &[], &ManifestOptions::default())?;
//!
//! // 16 files + migration + route
//! assert_eq!(manifest.actionable_count(), 18);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use nest_core::{Attribute, DerivedNames, GeneratorConfig, Inflector, ResourceSpec};
use serde_json::Value;

use crate::error::GenerateError;
use crate::templates::{Assigns, ScaffoldView, TemplateId};

/// Options that change which entries are planned.
#[derive(Debug, Clone)]
pub struct ManifestOptions {
    /// Omit the migration entry.
    pub skip_migration: bool,
    /// Directory migrations are written to.
    pub migrations_dir: Utf8PathBuf,
    /// Inflector for migration names.
    pub inflector: Inflector,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            skip_migration: false,
            migrations_dir: Utf8PathBuf::from("db/migrate"),
            inflector: Inflector::default(),
        }
    }
}

impl ManifestOptions {
    /// Builds options from the request and configuration.
    #[must_use]
    pub fn new(spec: &ResourceSpec, config: &GeneratorConfig) -> Self {
        Self {
            skip_migration: spec.skip_migration(),
            migrations_dir: config.migrations_dir.clone(),
            inflector: config.inflector(),
        }
    }
}

/// One planned operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestEntry {
    /// Fail if any of these fully qualified classes already exist.
    ClassCollisions {
        /// Qualified class names.
        class_names: Vec<String>,
    },

    /// Ensure a directory exists.
    Directory {
        /// Path relative to the destination root.
        path: Utf8PathBuf,
    },

    /// Render a template to a file.
    Template {
        /// Template to render.
        template: TemplateId,
        /// Path relative to the destination root.
        destination: Utf8PathBuf,
        /// Entry-specific variables, overlaid on the manifest's base.
        assigns: Assigns,
    },

    /// Render a migration into a timestamped file.
    Migration {
        /// Template to render.
        template: TemplateId,
        /// Migrations directory relative to the destination root.
        directory: Utf8PathBuf,
        /// File name without version prefix or extension.
        file_name: String,
        /// Entry-specific variables.
        assigns: Assigns,
    },

    /// Register `resources :<resource>` with the router.
    RouteResources {
        /// Resource collection name.
        resource: String,
    },
}

impl ManifestEntry {
    /// The template this entry renders, if any.
    #[must_use]
    pub const fn template(&self) -> Option<TemplateId> {
        match self {
            Self::Template { template, .. } | Self::Migration { template, .. } => Some(*template),
            Self::ClassCollisions { .. } | Self::Directory { .. } | Self::RouteResources { .. } => {
                None
            }
        }
    }

    /// The destination path for template and directory entries.
    #[must_use]
    pub fn destination(&self) -> Option<&Utf8Path> {
        match self {
            Self::Template { destination, .. } => Some(destination.as_path()),
            Self::Directory { path } => Some(path.as_path()),
            Self::ClassCollisions { .. } | Self::Migration { .. } | Self::RouteResources { .. } => {
                None
            }
        }
    }

    /// Returns `true` for entries that emit a file or change routes.
    ///
    /// Collision checks and directories are preparation, not output.
    #[inline]
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(
            self,
            Self::Template { .. } | Self::Migration { .. } | Self::RouteResources { .. }
        )
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassCollisions { class_names } => {
                write!(f, "collisions {}", class_names.join(", "))
            }
            Self::Directory { path } => write!(f, "directory {path}"),
            Self::Template { destination, .. } => write!(f, "template {destination}"),
            Self::Migration {
                directory,
                file_name,
                ..
            } => write!(f, "migration {directory}/{file_name}.rb"),
            Self::RouteResources { resource } => write!(f, "route resources :{resource}"),
        }
    }
}

/// An ordered plan plus the variables shared by every template.
#[derive(Debug, Clone)]
pub struct Manifest {
    base: Assigns,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Variables shared by every template: the derived names and
    /// `attributes`.
    #[inline]
    #[must_use]
    pub fn base(&self) -> &Assigns {
        &self.base
    }

    /// Entries in execution order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of entries that emit a file or change routes.
    #[must_use]
    pub fn actionable_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_actionable()).count()
    }
}

/// Joins `base` with each class path segment.
fn nested(base: &str, class_path: &[String]) -> Utf8PathBuf {
    let mut path = Utf8PathBuf::from(base);
    path.extend(class_path);
    path
}

/// Relative `require` path from a spec file to `spec/spec_helper`.
fn spec_helper_path(destination: &Utf8Path) -> String {
    let ups = destination
        .parent()
        .map_or(0, |dir| dir.components().count().saturating_sub(1));
    format!("{}/spec_helper", "/..".repeat(ups))
}

fn template(template: TemplateId, destination: Utf8PathBuf) -> ManifestEntry {
    ManifestEntry::Template {
        template,
        destination,
        assigns: Assigns::new(),
    }
}

fn spec_template(template: TemplateId, destination: Utf8PathBuf) -> ManifestEntry {
    let mut assigns = Assigns::new();
    assigns.insert(
        "spec_helper".to_owned(),
        Value::from(spec_helper_path(&destination)),
    );
    ManifestEntry::Template {
        template,
        destination,
        assigns,
    }
}

/// Plans every operation for one nested scaffold.
///
/// # Errors
///
/// Returns [`GenerateError::Context`] if the names cannot be serialized into
/// template variables.
pub fn build_manifest(
    names: &DerivedNames,
    attributes: &[Attribute],
    options: &ManifestOptions,
) -> Result<Manifest, GenerateError> {
    let mut base = match serde_json::to_value(names)? {
        Value::Object(map) => map,
        _ => Assigns::new(),
    };
    base.insert("attributes".to_owned(), serde_json::to_value(attributes)?);

    let class_path = names.class_path.as_slice();
    let controller_class_path = names.controller_class_path.as_slice();
    let controller_file_name = names.controller_file_name();
    let extension = &names.default_file_extension;

    let mut entries = vec![
        ManifestEntry::ClassCollisions {
            class_names: vec![
                format!("{}Controller", names.controller_class_name),
                format!("{}Helper", names.controller_class_name),
            ],
        },
        ManifestEntry::ClassCollisions {
            class_names: vec![names.class_name.clone()],
        },
    ];

    let directories = [
        nested("app/models", class_path),
        nested("app/controllers", controller_class_path),
        nested("app/helpers", controller_class_path),
        nested("app/views", controller_class_path).join(controller_file_name),
        nested("spec/controllers", controller_class_path),
        nested("spec/models", class_path),
        nested("spec/helpers", class_path),
        nested("spec/fixtures", class_path),
        nested("spec/views", controller_class_path).join(controller_file_name),
    ];
    entries.extend(
        directories
            .into_iter()
            .map(|path| ManifestEntry::Directory { path }),
    );

    let controller_specs = nested("spec/controllers", controller_class_path);
    entries.push(spec_template(
        TemplateId::RoutingSpec,
        controller_specs.join(format!("{controller_file_name}_routing_spec.rb")),
    ));
    entries.push(spec_template(
        TemplateId::ControllerSpec,
        controller_specs.join(format!("{controller_file_name}_controller_spec.rb")),
    ));
    entries.push(template(
        TemplateId::Controller,
        nested("app/controllers", controller_class_path)
            .join(format!("{controller_file_name}_controller.rb")),
    ));

    entries.push(template(
        TemplateId::Model,
        nested("app/models", class_path).join(format!("{}.rb", names.file_name())),
    ));
    entries.push(template(
        TemplateId::Fixtures,
        nested("spec/fixtures", class_path).join(format!("{}.yml", names.table_name)),
    ));
    entries.push(spec_template(
        TemplateId::ModelSpec,
        nested("spec/models", class_path).join(format!("{}_spec.rb", names.file_name())),
    ));

    let views = nested("app/views", controller_class_path).join(controller_file_name);
    let view_specs = nested("spec/views", controller_class_path).join(controller_file_name);
    for view in ScaffoldView::ALL {
        let action = view.action();
        let mut assigns = Assigns::new();
        assigns.insert("action".to_owned(), Value::from(action));
        entries.push(ManifestEntry::Template {
            template: TemplateId::View(view),
            destination: views.join(format!("{action}.{extension}")),
            assigns,
        });
        if !view.is_partial() {
            entries.push(spec_template(
                TemplateId::ViewSpec(view),
                view_specs.join(format!("{action}.{extension}_spec.rb")),
            ));
        }
    }

    if !options.skip_migration {
        let inflector = options.inflector;
        let migration_name = format!(
            "Create{}",
            inflector.pluralize(&names.class_name).replace("::", "")
        );
        let file_name = format!(
            "create_{}",
            inflector.pluralize(&names.file_path.replace('/', "_"))
        );
        let mut assigns = Assigns::new();
        assigns.insert("migration_name".to_owned(), Value::from(migration_name));
        entries.push(ManifestEntry::Migration {
            template: TemplateId::Migration,
            directory: options.migrations_dir.clone(),
            file_name,
            assigns,
        });
    }

    entries.push(ManifestEntry::RouteResources {
        resource: controller_file_name.to_owned(),
    });

    Ok(Manifest { base, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nest_core::derive;

    fn plan(name: &str, options: &ManifestOptions) -> Manifest {
        let names = derive(name, Some("site")).unwrap();
        build_manifest(&names, &[Attribute::parse("title:string")], options).unwrap()
    }

    fn listing(manifest: &Manifest) -> String {
        manifest
            .entries()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_manifest_listing() {
        let manifest = plan("category", &ManifestOptions::default());
        insta::assert_snapshot!(listing(&manifest), @r"
        collisions CategoriesController, CategoriesHelper
        collisions Category
        directory app/models
        directory app/controllers
        directory app/helpers
        directory app/views/categories
        directory spec/controllers
        directory spec/models
        directory spec/helpers
        directory spec/fixtures
        directory spec/views/categories
        template spec/controllers/categories_routing_spec.rb
        template spec/controllers/categories_controller_spec.rb
        template app/controllers/categories_controller.rb
        template app/models/category.rb
        template spec/fixtures/categories.yml
        template spec/models/category_spec.rb
        template app/views/categories/index.html.erb
        template spec/views/categories/index.html.erb_spec.rb
        template app/views/categories/show.html.erb
        template spec/views/categories/show.html.erb_spec.rb
        template app/views/categories/new.html.erb
        template spec/views/categories/new.html.erb_spec.rb
        template app/views/categories/edit.html.erb
        template spec/views/categories/edit.html.erb_spec.rb
        template app/views/categories/_form.html.erb
        template app/views/categories/_index_item.html.erb
        migration db/migrate/create_categories.rb
        route resources :categories
        ");
    }

    #[test]
    fn test_nested_manifest_paths() {
        let manifest = plan("admin/report", &ManifestOptions::default());
        let destinations: Vec<_> = manifest
            .entries()
            .iter()
            .filter(|e| matches!(e, ManifestEntry::Template { .. }))
            .filter_map(ManifestEntry::destination)
            .map(Utf8Path::as_str)
            .collect();

        assert!(destinations.contains(&"app/controllers/admin/reports_controller.rb"));
        assert!(destinations.contains(&"app/models/admin/report.rb"));
        assert!(destinations.contains(&"spec/fixtures/admin/admin_reports.yml"));
        assert!(destinations.contains(&"spec/models/admin/report_spec.rb"));
        assert!(destinations.contains(&"app/views/admin/reports/index.html.erb"));
        assert!(destinations.contains(&"spec/views/admin/reports/index.html.erb_spec.rb"));

        assert_eq!(
            manifest.entries().first(),
            Some(&ManifestEntry::ClassCollisions {
                class_names: vec![
                    "Admin::ReportsController".to_owned(),
                    "Admin::ReportsHelper".to_owned()
                ],
            })
        );
    }

    #[test]
    fn test_entry_counts() {
        let manifest = plan("category", &ManifestOptions::default());
        let templates = manifest
            .entries()
            .iter()
            .filter(|e| matches!(e, ManifestEntry::Template { .. }))
            .count();
        let directories = manifest
            .entries()
            .iter()
            .filter(|e| matches!(e, ManifestEntry::Directory { .. }))
            .count();
        assert_eq!(templates, 16);
        assert_eq!(directories, 9);
        assert_eq!(manifest.actionable_count(), 18);

        let skipped = plan(
            "category",
            &ManifestOptions {
                skip_migration: true,
                ..ManifestOptions::default()
            },
        );
        assert_eq!(skipped.actionable_count(), 17);
        assert!(
            !skipped
                .entries()
                .iter()
                .any(|e| matches!(e, ManifestEntry::Migration { .. }))
        );
    }

    #[test]
    fn test_partials_have_no_specs() {
        let manifest = plan("category", &ManifestOptions::default());
        let specs: Vec<_> = manifest
            .entries()
            .iter()
            .filter_map(ManifestEntry::template)
            .filter_map(|id| match id {
                TemplateId::ViewSpec(view) => Some(view),
                _ => None,
            })
            .collect();

        assert_eq!(
            specs,
            [
                ScaffoldView::Index,
                ScaffoldView::Show,
                ScaffoldView::New,
                ScaffoldView::Edit
            ]
        );
        for view in ScaffoldView::ALL {
            let has_view = manifest
                .entries()
                .iter()
                .any(|e| e.template() == Some(TemplateId::View(view)));
            assert!(has_view, "{}", view.action());
        }
    }

    #[test]
    fn test_migration_names_strip_nesting() {
        let manifest = plan("admin/report", &ManifestOptions::default());
        let migration = manifest
            .entries()
            .iter()
            .find(|e| matches!(e, ManifestEntry::Migration { .. }))
            .unwrap();

        let ManifestEntry::Migration {
            file_name,
            assigns,
            directory,
            ..
        } = migration
        else {
            unreachable!()
        };
        assert_eq!(file_name, "create_admin_reports");
        assert_eq!(directory, "db/migrate");
        assert_eq!(assigns["migration_name"], "CreateAdminReports");
    }

    #[test]
    fn test_spec_helper_depth() {
        assert_eq!(
            spec_helper_path(Utf8Path::new("spec/models/category_spec.rb")),
            "/../spec_helper"
        );
        assert_eq!(
            spec_helper_path(Utf8Path::new(
                "spec/views/admin/reports/index.html.erb_spec.rb"
            )),
            "/../../../spec_helper"
        );
    }

    #[test]
    fn test_base_assigns_include_names_and_attributes() {
        let manifest = plan("category", &ManifestOptions::default());
        assert_eq!(manifest.base()["class_name"], "Category");
        assert_eq!(manifest.base()["nesting_owner_plural"], "sites");
        assert_eq!(manifest.base()["attributes"][0]["name"], "title");
    }

    #[test]
    fn test_route_uses_controller_file_name() {
        let manifest = plan("admin/report", &ManifestOptions::default());
        assert_eq!(
            manifest.entries().last(),
            Some(&ManifestEntry::RouteResources {
                resource: "reports".to_owned()
            })
        );
    }
}
