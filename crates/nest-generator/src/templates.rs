//! Embedded scaffold templates and their renderer.
//!
//! Templates are Handlebars sources compiled into the binary. Each one is
//! identified by a [`TemplateId`]; the [`Renderer`] registers all of them
//! once and renders them against the manifest's variable map.
//!
//! Rendering is strict: a template that references a variable the map does
//! not provide fails instead of emitting an empty string. Output is not
//! HTML-escaped, since the templates produce source code.

use handlebars::Handlebars;
use serde_json::{Map, Value};

use crate::error::GenerateError;

/// Template variables.
pub type Assigns = Map<String, Value>;

/// One of the views generated for a scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaffoldView {
    /// Collection listing.
    Index,
    /// Single record.
    Show,
    /// Creation form.
    New,
    /// Edit form.
    Edit,
    /// Shared form fields partial.
    Form,
    /// Listing row partial.
    IndexItem,
}

impl ScaffoldView {
    /// All views, in generation order.
    pub const ALL: [Self; 6] = [
        Self::Index,
        Self::Show,
        Self::New,
        Self::Edit,
        Self::Form,
        Self::IndexItem,
    ];

    /// The action name, which is also the view's file stem.
    #[inline]
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::New => "new",
            Self::Edit => "edit",
            Self::Form => "_form",
            Self::IndexItem => "_index_item",
        }
    }

    /// Returns `true` for partials, which get no view spec.
    #[inline]
    #[must_use]
    pub const fn is_partial(self) -> bool {
        matches!(self, Self::Form | Self::IndexItem)
    }
}

/// Identifies an embedded template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// Route recognition and generation spec.
    RoutingSpec,
    /// Controller spec.
    ControllerSpec,
    /// Nested controller.
    Controller,
    /// Model class.
    Model,
    /// Fixture data.
    Fixtures,
    /// Model spec.
    ModelSpec,
    /// A view template.
    View(ScaffoldView),
    /// A view spec. Never built for partials.
    ViewSpec(ScaffoldView),
    /// Table creation migration.
    Migration,
}

impl TemplateId {
    /// Every template that is registered with the renderer.
    pub const ALL: [Self; 17] = [
        Self::RoutingSpec,
        Self::ControllerSpec,
        Self::Controller,
        Self::Model,
        Self::Fixtures,
        Self::ModelSpec,
        Self::View(ScaffoldView::Index),
        Self::View(ScaffoldView::Show),
        Self::View(ScaffoldView::New),
        Self::View(ScaffoldView::Edit),
        Self::View(ScaffoldView::Form),
        Self::View(ScaffoldView::IndexItem),
        Self::ViewSpec(ScaffoldView::Index),
        Self::ViewSpec(ScaffoldView::Show),
        Self::ViewSpec(ScaffoldView::New),
        Self::ViewSpec(ScaffoldView::Edit),
        Self::Migration,
    ];

    /// Registered template name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RoutingSpec => "routing_spec",
            Self::ControllerSpec => "controller_spec",
            Self::Controller => "controller",
            Self::Model => "model",
            Self::Fixtures => "fixtures",
            Self::ModelSpec => "model_spec",
            Self::View(ScaffoldView::Index) => "view_index",
            Self::View(ScaffoldView::Show) => "view_show",
            Self::View(ScaffoldView::New) => "view_new",
            Self::View(ScaffoldView::Edit) => "view_edit",
            Self::View(ScaffoldView::Form) => "view__form",
            Self::View(ScaffoldView::IndexItem) => "view__index_item",
            Self::ViewSpec(ScaffoldView::Index) => "index_view_spec",
            Self::ViewSpec(ScaffoldView::Show) => "show_view_spec",
            Self::ViewSpec(ScaffoldView::New) => "new_view_spec",
            Self::ViewSpec(ScaffoldView::Edit) => "edit_view_spec",
            Self::ViewSpec(ScaffoldView::Form) => "_form_view_spec",
            Self::ViewSpec(ScaffoldView::IndexItem) => "_index_item_view_spec",
            Self::Migration => "migration",
        }
    }

    /// Template source, or `None` for ids that have no template.
    #[must_use]
    pub const fn source(self) -> Option<&'static str> {
        Some(match self {
            Self::RoutingSpec => include_str!("../templates/routing_spec.rb.hbs"),
            Self::ControllerSpec => include_str!("../templates/controller_spec.rb.hbs"),
            Self::Controller => include_str!("../templates/controller.rb.hbs"),
            Self::Model => include_str!("../templates/model.rb.hbs"),
            Self::Fixtures => include_str!("../templates/fixtures.yml.hbs"),
            Self::ModelSpec => include_str!("../templates/model_spec.rb.hbs"),
            Self::View(ScaffoldView::Index) => include_str!("../templates/view_index.html.erb.hbs"),
            Self::View(ScaffoldView::Show) => include_str!("../templates/view_show.html.erb.hbs"),
            Self::View(ScaffoldView::New) => include_str!("../templates/view_new.html.erb.hbs"),
            Self::View(ScaffoldView::Edit) => include_str!("../templates/view_edit.html.erb.hbs"),
            Self::View(ScaffoldView::Form) => include_str!("../templates/view__form.html.erb.hbs"),
            Self::View(ScaffoldView::IndexItem) => {
                include_str!("../templates/view__index_item.html.erb.hbs")
            }
            Self::ViewSpec(ScaffoldView::Index) => include_str!("../templates/index_view_spec.rb.hbs"),
            Self::ViewSpec(ScaffoldView::Show) => include_str!("../templates/show_view_spec.rb.hbs"),
            Self::ViewSpec(ScaffoldView::New) => include_str!("../templates/new_view_spec.rb.hbs"),
            Self::ViewSpec(ScaffoldView::Edit) => include_str!("../templates/edit_view_spec.rb.hbs"),
            Self::ViewSpec(ScaffoldView::Form | ScaffoldView::IndexItem) => return None,
            Self::Migration => include_str!("../templates/migration.rb.hbs"),
        })
    }
}

/// Renders embedded templates.
///
/// # Examples
///
/// ```
/// use nest_generator::{Assigns, Renderer, TemplateId};
///
/// let renderer = Renderer::new()?;
/// let base: Assigns = serde_json::from_str(r#"{
///     "class_name": "Category",
///     "nesting_owner": "site",
///     "attributes": []
/// }"#)?;
/// let model = renderer.render(TemplateId::Model, &base, &Assigns::new())?;
/// assert!(model.starts_with("class Category < ActiveRecord::Base"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    /// Compiles and registers every template in [`TemplateId::ALL`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Template`] if a template fails to compile.
    pub fn new() -> Result<Self, GenerateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        for id in TemplateId::ALL {
            let Some(source) = id.source() else {
                continue;
            };
            registry
                .register_template_string(id.name(), source)
                .map_err(|e| GenerateError::Template {
                    template: id.name(),
                    source: Box::new(e),
                })?;
        }

        Ok(Self { registry })
    }

    /// Renders `template` with `base` variables overlaid by `assigns`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Render`] if the template references a
    /// missing variable or fails to render.
    pub fn render(
        &self,
        template: TemplateId,
        base: &Assigns,
        assigns: &Assigns,
    ) -> Result<String, GenerateError> {
        let mut data = base.clone();
        data.extend(assigns.iter().map(|(k, v)| (k.clone(), v.clone())));

        self.registry
            .render(template.name(), &data)
            .map_err(|e| GenerateError::Render {
                template: template.name(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partials() {
        let partials: Vec<_> = ScaffoldView::ALL
            .iter()
            .filter(|v| v.is_partial())
            .map(|v| v.action())
            .collect();
        assert_eq!(partials, ["_form", "_index_item"]);
    }

    #[test]
    fn test_every_registered_template_has_source() {
        for id in TemplateId::ALL {
            assert!(id.source().is_some(), "{} has no source", id.name());
        }
        assert!(TemplateId::ViewSpec(ScaffoldView::Form).source().is_none());
    }

    #[test]
    fn test_template_names_are_unique() {
        let mut names: Vec<_> = TemplateId::ALL.iter().map(|id| id.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TemplateId::ALL.len());
    }

    #[test]
    fn test_all_templates_compile() {
        assert!(Renderer::new().is_ok());
    }

    #[test]
    fn test_strict_mode_rejects_missing_variable() {
        let renderer = Renderer::new().unwrap();
        let err = renderer
            .render(TemplateId::Model, &Assigns::new(), &Assigns::new())
            .unwrap_err();
        assert!(matches!(err, GenerateError::Render { template: "model", .. }));
    }

    #[test]
    fn test_assigns_override_base() {
        let renderer = Renderer::new().unwrap();
        let base: Assigns =
            serde_json::from_value(serde_json::json!({
                "class_name": "Post",
                "nesting_owner": "blog",
                "attributes": []
            }))
                .unwrap();
        let mut assigns = Assigns::new();
        assigns.insert("class_name".to_owned(), Value::from("Article"));
        let out = renderer.render(TemplateId::Model, &base, &assigns).unwrap();
        assert!(out.contains("class Article"));
    }
}
