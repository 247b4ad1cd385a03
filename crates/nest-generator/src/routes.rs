//! Edits to the application's routes file.
//!
//! Resource routes are inserted on the line after the draw block opener and
//! removed by deleting that exact line. The functions here are pure: the
//! executor reads and writes the file.

/// The line that opens the route definitions.
pub const ROUTES_SENTINEL: &str = "ActionController::Routing::Routes.draw do |map|";

/// Result of a routes edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEdit {
    /// The file must be rewritten with these contents.
    Changed(String),
    /// The file already has the requested shape.
    Unchanged,
}

/// The route declaration for a resource collection.
#[must_use]
pub fn resources_line(resource: &str) -> String {
    format!("map.resources :{resource}")
}

/// Returns `true` if `contents` already declares the resource route.
#[must_use]
pub fn has_resources(contents: &str, resource: &str) -> bool {
    let line = resources_line(resource);
    contents.lines().any(|l| l.trim() == line)
}

/// Inserts `map.resources :<resource>` after the draw block opener.
///
/// Returns `None` if the file has no draw block.
///
/// # Examples
///
/// ```
/// use nest_generator::routes::{RouteEdit, insert_resources};
///
/// let routes = "ActionController::Routing::Routes.draw do |map|\nend\n";
/// let edit = insert_resources(routes, "categories");
/// assert_eq!(
///     edit,
///     Some(RouteEdit::Changed(
///         "ActionController::Routing::Routes.draw do |map|\n  map.resources :categories\nend\n"
///             .to_owned()
///     ))
/// );
/// ```
#[must_use]
pub fn insert_resources(contents: &str, resource: &str) -> Option<RouteEdit> {
    if has_resources(contents, resource) {
        return Some(RouteEdit::Unchanged);
    }
    if !contents.contains(ROUTES_SENTINEL) {
        return None;
    }

    let replacement = format!("{ROUTES_SENTINEL}\n  {}", resources_line(resource));
    Some(RouteEdit::Changed(contents.replacen(
        ROUTES_SENTINEL,
        &replacement,
        1,
    )))
}

/// Removes every line declaring the resource route.
#[must_use]
pub fn remove_resources(contents: &str, resource: &str) -> RouteEdit {
    if !has_resources(contents, resource) {
        return RouteEdit::Unchanged;
    }

    let line = resources_line(resource);
    let kept: String = contents
        .split_inclusive('\n')
        .filter(|l| l.trim() != line)
        .collect();
    RouteEdit::Changed(kept)
}
