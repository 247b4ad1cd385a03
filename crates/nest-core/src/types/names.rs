//! Name derivation for a nested resource.
//!
//! Every identifier used by the manifest and the templates is computed here,
//! once, from the resource name and owner name. Two parallel sets of names
//! are produced:
//!
//! - the model side, from the raw name (`admin/report` → `Admin::Report`)
//! - the controller side, from the pluralized raw name
//!   (`admin/reports` → `Admin::Reports`)
//!
//! # Examples
//!
//! ```
//! use nest_core::derive;
//!
//! let names = derive("category", Some("sites"))?;
//! assert_eq!(names.class_name, "Category");
//! assert_eq!(names.controller_file_path, "categories");
//! assert_eq!(names.nesting_owner, "site");
//! assert_eq!(names.nesting_owner_plural, "sites");
//! # Ok::<(), nest_core::ConfigError>(())
//! ```

use nest_inflect::{Inflector, camelize, capitalize, demodulize, underscore};
use serde::Serialize;
use smallvec::SmallVec;

use super::resource::ResourceSpec;
use crate::config::GeneratorConfig;
use crate::error::ConfigError;

/// Separator between module segments in a class name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Underscored module path segments.
pub type ClassPath = SmallVec<[String; 2]>;

/// A name split into its module qualifier and base name.
#[derive(Debug)]
struct ModuleParts {
    base: String,
    class_path: ClassPath,
    file_path: String,
    nesting: String,
    depth: usize,
}

/// Splits `admin/reports/category` or `Admin::Reports::Category`.
///
/// `/` takes precedence when both separators appear.
fn extract_modules(name: &str) -> Result<ModuleParts, ConfigError> {
    let mut modules: Vec<&str> = if name.contains('/') {
        name.split('/').collect()
    } else {
        name.split(NAMESPACE_SEPARATOR).collect()
    };

    if modules.iter().any(|segment| segment.trim().is_empty()) {
        return Err(ConfigError::invalid_name(name, "empty module segment"));
    }

    let base = modules
        .pop()
        .ok_or_else(|| ConfigError::invalid_name(name, "name is empty"))?;

    let class_path: ClassPath = modules.iter().map(|m| underscore(m)).collect();
    let base_path = underscore(base);
    let file_path = class_path
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(base_path.as_str()))
        .collect::<Vec<_>>()
        .join("/");
    let nesting = modules
        .iter()
        .map(|m| camelize(m))
        .collect::<Vec<_>>()
        .join(NAMESPACE_SEPARATOR);

    Ok(ModuleParts {
        base: base.to_owned(),
        depth: modules.len(),
        class_path,
        file_path,
        nesting,
    })
}

/// Returns `(camelized, underscored, plural)` forms of a base name.
fn inflect_names(base: &str, inflector: Inflector) -> (String, String, String) {
    let camel = camelize(base);
    let under = underscore(&camel);
    let plural = inflector.pluralize(&under);
    (camel, under, plural)
}

fn qualify(nesting: &str, class_name: String) -> String {
    if nesting.is_empty() {
        class_name
    } else {
        format!("{nesting}{NAMESPACE_SEPARATOR}{class_name}")
    }
}

/// Every identifier derived from a [`ResourceSpec`].
///
/// Serializes to the variable map shared by all templates.
///
/// # Invariants
///
/// - `class_name` is `class_nesting::class_name_without_nesting`, or just
///   `class_name_without_nesting` when `class_nesting_depth` is zero.
/// - `class_nesting_depth == class_path.len()`.
/// - The same holds for the `controller_*` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedNames {
    /// The raw name as supplied.
    pub name: String,

    /// Module-qualified model class name (`Admin::Report`).
    pub class_name: String,
    /// Model class name without modules (`Report`).
    pub class_name_without_nesting: String,
    /// Underscored module segments (`["admin"]`).
    pub class_path: ClassPath,
    /// Underscored path including the base name (`admin/report`).
    pub file_path: String,
    /// Camelized module prefix (`Admin`), empty when unnested.
    pub class_nesting: String,
    /// Number of module segments.
    pub class_nesting_depth: usize,
    /// Singular underscored base name, also the model file name (`report`).
    pub singular_name: String,
    /// Plural underscored base name (`reports`).
    pub plural_name: String,
    /// Database table name (`admin_reports`).
    pub table_name: String,
    /// Final segment of `class_name`.
    pub model_name: String,

    /// Pluralized raw name (`admin/reports`).
    pub controller_name: String,
    /// Underscored module segments on the controller side.
    pub controller_class_path: ClassPath,
    /// Underscored controller path (`admin/reports`).
    pub controller_file_path: String,
    /// Camelized module prefix on the controller side.
    pub controller_class_nesting: String,
    /// Number of controller module segments.
    pub controller_class_nesting_depth: usize,
    /// Module-qualified controller class name without suffix (`Admin::Reports`).
    pub controller_class_name: String,
    /// Controller file name and view directory (`reports`).
    pub controller_singular_name: String,
    /// Controller table name (`reports`).
    pub controller_plural_name: String,

    /// Singular underscored owner (`site`).
    pub nesting_owner: String,
    /// Owner class name (`Site`).
    pub nesting_owner_class: String,
    /// Capitalized owner (`Site`).
    pub nesting_owner_cap: String,
    /// Plural owner (`sites`).
    pub nesting_owner_plural: String,
    /// Capitalized plural owner (`Sites`).
    pub nesting_owner_plural_cap: String,

    /// Capitalized singular name (`Report`).
    pub singular_name_cap: String,
    /// Capitalized plural name (`Reports`).
    pub plural_name_cap: String,

    /// View template extension (`html.erb`).
    pub default_file_extension: String,
    /// Edit path suffix (`/edit`).
    pub resource_edit_path: &'static str,
}

impl DerivedNames {
    /// Derives all names for `spec` under `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] if the owner is absent or
    /// blank, and [`ConfigError::InvalidName`] if the resource name is empty
    /// or has an empty module segment.
    pub fn derive(spec: &ResourceSpec, config: &GeneratorConfig) -> Result<Self, ConfigError> {
        let owner = spec
            .owner()
            .map(str::trim)
            .filter(|owner| !owner.is_empty())
            .ok_or(ConfigError::MissingOption { option: "owner" })?;

        let name = spec.name().trim();
        if name.is_empty() {
            return Err(ConfigError::invalid_name(spec.name(), "name is empty"));
        }

        let inflector = config.inflector();

        // Model side.
        let model = extract_modules(name)?;
        let (class_name_without_nesting, singular_name, plural_name) =
            inflect_names(&model.base, inflector);
        let class_name = qualify(&model.nesting, class_name_without_nesting.clone());
        let table_name = if model.nesting.is_empty() {
            plural_name.clone()
        } else {
            format!("{}_{plural_name}", underscore(&model.nesting))
        }
        .replace('/', "_");

        // Controller side.
        let controller_name = inflector.pluralize(name);
        let controller = extract_modules(&controller_name)?;
        let (controller_class_name_without_nesting, controller_singular_name, controller_plural_name) =
            inflect_names(&controller.base, inflector);
        let controller_class_name =
            qualify(&controller.nesting, controller_class_name_without_nesting);

        // Owner.
        let nesting_owner = inflector.singularize(&underscore(owner));
        let nesting_owner_plural = inflector.pluralize(&nesting_owner);

        Ok(Self {
            name: name.to_owned(),
            model_name: demodulize(&class_name).to_owned(),
            class_name,
            class_name_without_nesting,
            class_path: model.class_path,
            file_path: model.file_path,
            class_nesting: model.nesting,
            class_nesting_depth: model.depth,
            singular_name_cap: capitalize(&singular_name),
            plural_name_cap: capitalize(&plural_name),
            singular_name,
            plural_name,
            table_name,

            controller_name,
            controller_class_path: controller.class_path,
            controller_file_path: controller.file_path,
            controller_class_nesting: controller.nesting,
            controller_class_nesting_depth: controller.depth,
            controller_class_name,
            controller_singular_name,
            controller_plural_name,

            nesting_owner_class: inflector.classify(&nesting_owner),
            nesting_owner_cap: capitalize(&nesting_owner),
            nesting_owner_plural_cap: capitalize(&nesting_owner_plural),
            nesting_owner,
            nesting_owner_plural,

            default_file_extension: config.default_file_extension.clone(),
            resource_edit_path: config.edit_path.suffix(),
        })
    }

    /// Model file name; same as [`singular_name`](Self::singular_name).
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.singular_name
    }

    /// Controller file name and view directory; same as
    /// [`controller_singular_name`](Self::controller_singular_name).
    #[inline]
    #[must_use]
    pub fn controller_file_name(&self) -> &str {
        &self.controller_singular_name
    }

    /// Controller table name; same as
    /// [`controller_plural_name`](Self::controller_plural_name).
    #[inline]
    #[must_use]
    pub fn controller_table_name(&self) -> &str {
        &self.controller_plural_name
    }
}

/// Derives names with the default configuration.
///
/// # Errors
///
/// See [`DerivedNames::derive`].
pub fn derive(raw_name: &str, owner_name: Option<&str>) -> Result<DerivedNames, ConfigError> {
    DerivedNames::derive(
        &ResourceSpec::new(raw_name, owner_name),
        &GeneratorConfig::default(),
    )
}
