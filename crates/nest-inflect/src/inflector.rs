//! Number inflection (plural/singular) driven by the rule tables.
//!
//! This module provides [`Inflector`], a cheap copyable handle onto a
//! compiled rule set, and [`Locale`], which selects the rule set.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::case::camelize;
use crate::rules::{IRREGULARS, PLURALS, SINGULARS, UNCOUNTABLES};

/// The language whose inflection rules are applied.
///
/// Only English is supported. The locale is still carried explicitly so
/// callers state which rules they expect instead of relying on global state.
///
/// # Examples
///
/// ```
/// use nest_inflect::Locale;
///
/// let locale: Locale = serde_json::from_str(r#""en-US""#).unwrap();
/// assert_eq!(locale, Locale::EnUs);
/// assert_eq!(locale.tag(), "en-US");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Locale {
    /// United States English.
    #[default]
    #[serde(rename = "en-US", alias = "en", alias = "en_US")]
    EnUs,
}

impl Locale {
    /// Returns the BCP 47 tag for this locale.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
        }
    }
}

/// A compiled `(pattern, replacement)` rule.
#[derive(Debug)]
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

/// The compiled rule set for one locale.
#[derive(Debug)]
struct Inflections {
    plurals: Vec<Rule>,
    singulars: Vec<Rule>,
}

static ENGLISH: LazyLock<Inflections> = LazyLock::new(|| Inflections {
    plurals: compile(PLURALS),
    singulars: compile(SINGULARS),
});

fn compile(table: &[(&str, &'static str)]) -> Vec<Rule> {
    table
        .iter()
        .filter_map(|&(pattern, replacement)| {
            Regex::new(&format!("(?i){pattern}"))
                .ok()
                .map(|pattern| Rule {
                    pattern,
                    replacement,
                })
        })
        .collect()
}

/// Applies plural and singular inflections for a [`Locale`].
///
/// The rule set is compiled once per process and shared; the handle itself
/// is `Copy`.
///
/// # Examples
///
/// ```
/// use nest_inflect::{Inflector, Locale};
///
/// let inflector = Inflector::new(Locale::EnUs);
/// assert_eq!(inflector.pluralize("admin/report"), "admin/reports");
/// assert_eq!(inflector.singularize("categories"), "category");
/// assert_eq!(inflector.classify("site_owners"), "SiteOwner");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Inflector {
    locale: Locale,
    inflections: &'static Inflections,
}

impl Default for Inflector {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl Inflector {
    /// Creates an inflector for the given locale.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        let inflections = match locale {
            Locale::EnUs => &*ENGLISH,
        };
        Self {
            locale,
            inflections,
        }
    }

    /// Returns the locale this inflector was created for.
    #[inline]
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the plural form of `word`.
    ///
    /// Only the trailing word is inflected, so qualified names such as
    /// `admin/report` keep their prefix. Already-plural words are returned
    /// unchanged.
    #[must_use]
    pub fn pluralize(&self, word: &str) -> String {
        if word.is_empty() || is_uncountable(word) {
            return word.to_owned();
        }

        for &(singular, plural) in IRREGULARS.iter().rev() {
            if ends_with_ignore_case(word, plural) {
                return word.to_owned();
            }
            if let Some(inflected) = replace_suffix(word, singular, plural) {
                return inflected;
            }
        }

        apply_rules(word, &self.inflections.plurals)
    }

    /// Returns the singular form of `word`.
    ///
    /// Already-singular words are returned unchanged.
    #[must_use]
    pub fn singularize(&self, word: &str) -> String {
        if word.is_empty() || is_uncountable(word) {
            return word.to_owned();
        }

        for &(singular, plural) in IRREGULARS.iter().rev() {
            if let Some(inflected) = replace_suffix(word, plural, singular) {
                return inflected;
            }
            if ends_with_ignore_case(word, singular) {
                return word.to_owned();
            }
        }

        apply_rules(word, &self.inflections.singulars)
    }

    /// Converts a table-style name into a class name.
    ///
    /// Any schema prefix before the last `.` is dropped, the remainder is
    /// singularized and then camelized.
    #[must_use]
    pub fn classify(&self, table_name: &str) -> String {
        let base = table_name.rsplit('.').next().unwrap_or(table_name);
        camelize(&self.singularize(base))
    }
}

/// Applies the last matching rule in `rules`, or returns `word` unchanged.
fn apply_rules(word: &str, rules: &[Rule]) -> String {
    rules
        .iter()
        .rev()
        .find(|rule| rule.pattern.is_match(word))
        .map_or_else(
            || word.to_owned(),
            |rule| rule.pattern.replace(word, rule.replacement).into_owned(),
        )
}

/// Checks the trailing word (letters, digits, `_`) against the uncountables.
fn is_uncountable(word: &str) -> bool {
    let last = word
        .rsplit(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .unwrap_or(word);
    UNCOUNTABLES
        .iter()
        .any(|uncountable| last.eq_ignore_ascii_case(uncountable))
}

fn ends_with_ignore_case(word: &str, suffix: &str) -> bool {
    word.len() >= suffix.len()
        && word.is_char_boundary(word.len() - suffix.len())
        && word[word.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Replaces a case-insensitive `from` suffix with `to`, keeping the case of
/// the suffix's first letter.
fn replace_suffix(word: &str, from: &str, to: &str) -> Option<String> {
    if !ends_with_ignore_case(word, from) {
        return None;
    }

    let start = word.len() - from.len();
    let first = word[start..].chars().next()?;
    let mut rest = to.chars();
    let to_first = rest.next()?;

    let mut inflected = String::with_capacity(start + to.len());
    inflected.push_str(&word[..start]);
    if first.is_uppercase() {
        inflected.extend(to_first.to_uppercase());
    } else {
        inflected.push(to_first);
    }
    inflected.push_str(rest.as_str());
    Some(inflected)
}
