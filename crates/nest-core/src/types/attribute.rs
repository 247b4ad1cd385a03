//! Model attributes supplied as `field:type` arguments.
//!
//! Each attribute resolves its type against a static table once, at
//! construction, to a Ruby default literal (used by specs), a YAML fixture
//! value, an input kind (used by view specs), and a form helper (used by
//! views). Unknown types are accepted and fall back to empty defaults.

use nest_inflect::humanize;
use serde::Serialize;

/// The HTML element a view spec expects for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// `<input>`.
    Input,
    /// `<textarea>`.
    Textarea,
}

/// Values resolved from an attribute type.
#[derive(Debug, Clone, Copy)]
struct FieldDefaults {
    default_value: &'static str,
    fixture_value: &'static str,
    input_type: InputKind,
    field_type: &'static str,
}

const fn defaults(
    default_value: &'static str,
    fixture_value: &'static str,
    input_type: InputKind,
    field_type: &'static str,
) -> FieldDefaults {
    FieldDefaults {
        default_value,
        fixture_value,
        input_type,
        field_type,
    }
}

/// Type name → defaults. Unlisted types use [`FALLBACK`].
const FIELD_DEFAULTS: &[(&str, FieldDefaults)] = &[
    ("int", defaults("\"1\"", "1", InputKind::Input, "text_field")),
    ("integer", defaults("\"1\"", "1", InputKind::Input, "text_field")),
    ("float", defaults("\"1.5\"", "1.5", InputKind::Input, "text_field")),
    ("decimal", defaults("\"9.99\"", "9.99", InputKind::Input, "text_field")),
    (
        "datetime",
        defaults("Time.now", DB_NOW, InputKind::Input, "datetime_select"),
    ),
    (
        "timestamp",
        defaults("Time.now", DB_NOW, InputKind::Input, "datetime_select"),
    ),
    ("time", defaults("Time.now", DB_NOW, InputKind::Input, "time_select")),
    ("date", defaults("Date.today", DB_TODAY, InputKind::Input, "date_select")),
    ("string", defaults("\"MyString\"", "MyString", InputKind::Input, "text_field")),
    ("text", defaults("\"MyText\"", "MyText", InputKind::Textarea, "text_area")),
    ("boolean", defaults("false", "false", InputKind::Input, "check_box")),
];

/// Fixture files are run through ERB before being parsed as YAML.
const DB_NOW: &str = "<%= Time.now.to_s(:db) %>";
const DB_TODAY: &str = "<%= Date.today.to_s(:db) %>";

const FALLBACK: FieldDefaults = defaults("", "", InputKind::Input, "text_field");

/// Type assumed when an argument has no `:type` part.
const DEFAULT_TYPE: &str = "string";

/// A model attribute with its resolved defaults.
///
/// # Examples
///
/// ```
/// use nest_core::{Attribute, InputKind};
///
/// let attr = Attribute::parse("body:text");
/// assert_eq!(attr.name, "body");
/// assert_eq!(attr.default_value, "\"MyText\"");
/// assert_eq!(attr.fixture_value, "MyText");
/// assert_eq!(attr.input_type, InputKind::Textarea);
///
/// // Unknown types degrade instead of failing.
/// let attr = Attribute::parse("location:geometry");
/// assert_eq!(attr.default_value, "");
/// assert_eq!(attr.input_type, InputKind::Input);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Column name.
    pub name: String,

    /// Column type as written on the command line.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Ruby literal used in specs.
    pub default_value: &'static str,

    /// YAML scalar (possibly ERB) used in fixtures.
    pub fixture_value: &'static str,

    /// Element kind asserted by view specs.
    pub input_type: InputKind,

    /// Form builder helper used by views.
    pub field_type: &'static str,

    /// Display label.
    pub human_name: String,

    /// Whether the column references another model (`references`,
    /// `belongs_to`).
    pub reference: bool,
}

impl Attribute {
    /// Creates an attribute and resolves its defaults.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let name = name.into();
        let type_name = type_name.into();
        let resolved = FIELD_DEFAULTS
            .iter()
            .find(|(known, _)| *known == type_name)
            .map_or(FALLBACK, |&(_, resolved)| resolved);

        Self {
            reference: matches!(type_name.as_str(), "references" | "belongs_to"),
            human_name: humanize(&name),
            name,
            type_name,
            default_value: resolved.default_value,
            fixture_value: resolved.fixture_value,
            input_type: resolved.input_type,
            field_type: resolved.field_type,
        }
    }

    /// Parses a `field:type` argument.
    ///
    /// A missing or empty type means `string`. Anything after a second `:`
    /// is ignored.
    #[must_use]
    pub fn parse(arg: &str) -> Self {
        let mut parts = arg.splitn(3, ':');
        let name = parts.next().unwrap_or_default();
        let type_name = parts
            .next()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TYPE);
        Self::new(name, type_name)
    }
}
