//! Free-text catalog search helpers.
//!
//! Search is a case-insensitive substring match over title, author and
//! genre joined with OR. No ranking, no tokenization.

/// Normalise a raw `?q=` value.
///
/// Returns `None` when the term is absent or blank, meaning "list everything".
pub fn normalize_term(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|t| !t.is_empty())
}

/// Build a `LIKE`/`ILIKE` pattern matching `term` anywhere in a column.
///
/// `%`, `_` and `\` in the term are escaped so they match literally.
///
/// ```
/// use biblioteca_core::search::like_pattern;
///
/// assert_eq!(like_pattern("orwell"), "%orwell%");
/// assert_eq!(like_pattern("100%"), "%100\\%%");
/// ```
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive containment check used by non-SQL backends.
///
/// `needle_lower` must already be lowercased.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Whether any of the searchable fields contains `term`.
pub fn matches_any(fields: &[&str], term: &str) -> bool {
    let needle = term.to_lowercase();
    fields.iter().any(|f| contains_ignore_case(f, &needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_terms_normalise_to_none() {
        assert_eq!(normalize_term(None), None);
        assert_eq!(normalize_term(Some("")), None);
        assert_eq!(normalize_term(Some("   ")), None);
        assert_eq!(normalize_term(Some(" orwell ")), Some("orwell"));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\x"), "%c:\\\\x%");
    }

    #[test]
    fn matching_ignores_case() {
        let fields = ["1984", "George Orwell", "Ciencia Ficción"];
        assert!(matches_any(&fields, "orwell"));
        assert!(matches_any(&fields, "ORWELL"));
        assert!(matches_any(&fields, "ficción"));
        assert!(!matches_any(&fields, "cervantes"));
    }

    #[test]
    fn matching_handles_non_ascii_case() {
        assert!(matches_any(&["Producción"], "PRODUCCIÓN"));
    }
}
