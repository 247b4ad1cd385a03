//! The user's request, as parsed from the command line.

use super::attribute::Attribute;

/// A request to scaffold one nested resource.
///
/// Built once from command-line arguments and never mutated after
/// construction. Validation of the owner is deferred to
/// [`DerivedNames::derive`](super::DerivedNames::derive) so the error can
/// name the missing option.
///
/// # Examples
///
/// ```
/// use nest_core::ResourceSpec;
///
/// let spec = ResourceSpec::new("category", Some("site"))
///     .with_attributes(["name:string", "position:integer"])
///     .with_skip_migration(true);
///
/// assert_eq!(spec.name(), "category");
/// assert_eq!(spec.owner(), Some("site"));
/// assert_eq!(spec.attributes().len(), 2);
/// assert!(spec.skip_migration());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    name: String,
    owner: Option<String>,
    skip_migration: bool,
    attributes: Vec<Attribute>,
}

impl ResourceSpec {
    /// Creates a spec for `name` nested under `owner`.
    #[must_use]
    pub fn new(name: impl Into<String>, owner: Option<&str>) -> Self {
        Self {
            name: name.into(),
            owner: owner.map(str::to_owned),
            skip_migration: false,
            attributes: Vec::new(),
        }
    }

    /// Sets whether the migration is omitted.
    #[must_use]
    pub const fn with_skip_migration(mut self, skip: bool) -> Self {
        self.skip_migration = skip;
        self
    }

    /// Parses `field:type` arguments into attributes.
    #[must_use]
    pub fn with_attributes<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.attributes
            .extend(args.into_iter().map(|arg| Attribute::parse(arg.as_ref())));
        self
    }

    /// The raw resource name, possibly module-qualified.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owner name, if one was supplied.
    #[inline]
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Whether the migration entry is omitted.
    #[inline]
    #[must_use]
    pub const fn skip_migration(&self) -> bool {
        self.skip_migration
    }

    /// Attributes in command-line order.
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_attributes() {
        let spec = ResourceSpec::new("post", None);
        assert_eq!(spec.owner(), None);
        assert!(spec.attributes().is_empty());
        assert!(!spec.skip_migration());
    }

    #[test]
    fn test_attributes_keep_order() {
        let spec = ResourceSpec::new("post", Some("blog"))
            .with_attributes(vec!["title:string".to_owned(), "body:text".to_owned()]);
        let names: Vec<_> = spec.attributes().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["title", "body"]);
    }
}
