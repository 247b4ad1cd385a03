//! Case conversion between path-style and constant-style names.
//!
//! Names move between two spellings: underscored paths (`admin/report_card`)
//! and constant paths (`Admin::ReportCard`). Underscoring uses `heck` for
//! word splitting. Camelizing only capitalizes the first letter and the
//! letter after each `_`, so acronyms already in a constant (`HTMLPage`)
//! survive.

use heck::ToSnakeCase;

/// Splits a name on both `/` and `::` separators.
fn segments(term: &str) -> impl Iterator<Item = &str> {
    term.split("::").flat_map(|part| part.split('/'))
}

/// Capitalizes the first letter and each letter following `_`, dropping
/// the underscore. A trailing `_` is kept.
fn camelize_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
    }
    while let Some(c) = chars.next() {
        if c != '_' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => out.extend(next.to_uppercase()),
            None => out.push('_'),
        }
    }
    out
}

/// Converts an underscored path into a constant path.
///
/// # Examples
///
/// ```
/// use nest_inflect::camelize;
///
/// assert_eq!(camelize("report_card"), "ReportCard");
/// assert_eq!(camelize("admin/report_card"), "Admin::ReportCard");
/// assert_eq!(camelize("Admin::Report"), "Admin::Report");
/// assert_eq!(camelize("HTMLPage"), "HTMLPage");
/// ```
#[must_use]
pub fn camelize(term: &str) -> String {
    segments(term)
        .map(camelize_segment)
        .collect::<Vec<_>>()
        .join("::")
}

/// Converts a constant path into an underscored path.
///
/// # Examples
///
/// ```
/// use nest_inflect::underscore;
///
/// assert_eq!(underscore("ReportCard"), "report_card");
/// assert_eq!(underscore("Admin::ReportCard"), "admin/report_card");
/// assert_eq!(underscore("site-owners"), "site_owners");
/// ```
#[must_use]
pub fn underscore(term: &str) -> String {
    segments(term)
        .map(ToSnakeCase::to_snake_case)
        .collect::<Vec<_>>()
        .join("/")
}

/// Upper-cases the first character and lower-cases the rest.
///
/// # Examples
///
/// ```
/// use nest_inflect::capitalize;
///
/// assert_eq!(capitalize("categories"), "Categories");
/// assert_eq!(capitalize("SITE"), "Site");
/// ```
#[must_use]
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Turns an attribute name into a display label.
///
/// # Examples
///
/// ```
/// use nest_inflect::humanize;
///
/// assert_eq!(humanize("published_at"), "Published at");
/// assert_eq!(humanize("author_id"), "Author");
/// ```
#[must_use]
pub fn humanize(word: &str) -> String {
    let base = word.strip_suffix("_id").unwrap_or(word);
    capitalize(&base.replace('_', " "))
}

/// Returns the final segment of a constant path.
///
/// # Examples
///
/// ```
/// use nest_inflect::demodulize;
///
/// assert_eq!(demodulize("Admin::Reports::Category"), "Category");
/// assert_eq!(demodulize("Category"), "Category");
/// ```
#[must_use]
pub fn demodulize(term: &str) -> &str {
    term.rsplit("::").next().unwrap_or(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camelize_underscore_inverse() {
        for path in ["category", "report_card", "admin/report_card", "admin/reports/category"] {
            assert_eq!(underscore(&camelize(path)), path);
        }
    }

    #[test]
    fn test_camelize_keeps_segment_order() {
        assert_eq!(camelize("admin/reports/category"), "Admin::Reports::Category");
        assert_eq!(camelize("Admin::Reports::Category"), "Admin::Reports::Category");
    }

    #[test]
    fn test_camelize_keeps_acronyms() {
        assert_eq!(camelize("HTMLPage"), "HTMLPage");
        assert_eq!(camelize("admin/HTMLPage"), "Admin::HTMLPage");
        assert_eq!(camelize("html_page"), "HtmlPage");
        assert_eq!(camelize("xml_http_request"), "XmlHttpRequest");
    }

    #[test]
    fn test_camelize_underscore_edges() {
        assert_eq!(camelize(""), "");
        assert_eq!(camelize("report_"), "Report_");
    }

    #[test]
    fn test_capitalize_edge_cases() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize("siteOwner"), "Siteowner");
    }

    #[test]
    fn test_humanize_plain_word() {
        assert_eq!(humanize("title"), "Title");
        assert_eq!(humanize("body_text"), "Body text");
    }
}
