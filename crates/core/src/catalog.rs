//! Book input validation.
//!
//! The HTTP layer accepts loosely-typed JSON (the browser form posts the
//! year as a string), so the raw fields are checked and normalised here
//! before anything reaches a store.

use serde_json::Value;

use crate::error::CoreError;

/// Prefix of the message returned when required fields are absent.
pub const MISSING_FIELDS_MESSAGE: &str = "Faltan campos requeridos";

/// Column widths of the catalog table.
pub const MAX_TITULO_LEN: usize = 255;
pub const MAX_AUTOR_LEN: usize = 255;
pub const MAX_GENERO_LEN: usize = 100;
pub const MAX_ISBN_LEN: usize = 20;

/// A validated book ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub titulo: String,
    pub autor: String,
    pub anio: i32,
    pub genero: String,
    pub isbn: Option<String>,
}

/// Borrowed view over an unvalidated create request.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookInput<'a> {
    pub titulo: Option<&'a str>,
    pub autor: Option<&'a str>,
    pub anio: Option<&'a Value>,
    pub genero: Option<&'a str>,
    pub isbn: Option<&'a str>,
}

/// Validate a create request.
///
/// - `titulo`, `autor` and `genero` must be present and non-blank.
/// - `año` must be present and be an integer or an integer-parseable string.
/// - A blank `isbn` is treated as absent.
/// - Text fields must fit their column widths.
///
/// All missing fields are reported together.
pub fn validate_new_book(input: BookInput<'_>) -> Result<NewBook, CoreError> {
    let titulo = non_blank(input.titulo);
    let autor = non_blank(input.autor);
    let genero = non_blank(input.genero);
    let anio_present = input.anio.is_some_and(|v| !is_blank_value(v));

    let mut missing = Vec::new();
    if titulo.is_none() {
        missing.push("titulo");
    }
    if autor.is_none() {
        missing.push("autor");
    }
    if !anio_present {
        missing.push("año");
    }
    if genero.is_none() {
        missing.push("genero");
    }

    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "{MISSING_FIELDS_MESSAGE}: {}",
            missing.join(", ")
        )));
    }

    let anio = input.anio.and_then(parse_year).ok_or_else(|| {
        CoreError::Validation("El campo año debe ser un número entero".to_string())
    })?;

    let book = NewBook {
        titulo: titulo.unwrap_or_default(),
        autor: autor.unwrap_or_default(),
        anio,
        genero: genero.unwrap_or_default(),
        isbn: non_blank(input.isbn),
    };

    check_len("titulo", &book.titulo, MAX_TITULO_LEN)?;
    check_len("autor", &book.autor, MAX_AUTOR_LEN)?;
    check_len("genero", &book.genero, MAX_GENERO_LEN)?;
    if let Some(ref isbn) = book.isbn {
        check_len("isbn", isbn, MAX_ISBN_LEN)?;
    }

    Ok(book)
}

/// Parse a year from a JSON integer or a numeric string.
///
/// ```
/// use biblioteca_core::catalog::parse_year;
/// use serde_json::json;
///
/// assert_eq!(parse_year(&json!(1965)), Some(1965));
/// assert_eq!(parse_year(&json!(" 1605 ")), Some(1605));
/// assert_eq!(parse_year(&json!("mil")), None);
/// ```
pub fn parse_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "El campo {field} admite como máximo {max} caracteres"
        )));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn dune(anio: &Value) -> BookInput<'_> {
        BookInput {
            titulo: Some("Dune"),
            autor: Some("Frank Herbert"),
            anio: Some(anio),
            genero: Some("Sci-Fi"),
            isbn: None,
        }
    }

    #[test]
    fn accepts_complete_input() {
        let anio = json!(1965);
        let book = validate_new_book(dune(&anio)).unwrap();
        assert_eq!(book.titulo, "Dune");
        assert_eq!(book.autor, "Frank Herbert");
        assert_eq!(book.anio, 1965);
        assert_eq!(book.genero, "Sci-Fi");
        assert_eq!(book.isbn, None);
    }

    #[test]
    fn accepts_year_as_string() {
        let anio = json!("1965");
        assert_eq!(validate_new_book(dune(&anio)).unwrap().anio, 1965);
    }

    #[test]
    fn trims_text_fields_and_drops_blank_isbn() {
        let anio = json!(1605);
        let input = BookInput {
            titulo: Some("  Don Quijote  "),
            isbn: Some("   "),
            ..dune(&anio)
        };
        let book = validate_new_book(input).unwrap();
        assert_eq!(book.titulo, "Don Quijote");
        assert_eq!(book.isbn, None);
    }

    #[test]
    fn reports_every_missing_field() {
        let err = validate_new_book(BookInput::default()).unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation(msg) if msg == "Faltan campos requeridos: titulo, autor, año, genero"
        );
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let anio = json!("");
        let input = BookInput {
            autor: Some("  "),
            ..dune(&anio)
        };
        let err = validate_new_book(input).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.ends_with("autor, año"));
    }

    #[test]
    fn null_year_is_missing() {
        let anio = Value::Null;
        let err = validate_new_book(dune(&anio)).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.ends_with(": año"));
    }

    #[test]
    fn rejects_values_wider_than_their_column() {
        let anio = json!(1965);
        let long_isbn = "9".repeat(MAX_ISBN_LEN + 1);
        let input = BookInput {
            isbn: Some(&long_isbn),
            ..dune(&anio)
        };
        let err = validate_new_book(input).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("isbn"));
    }

    #[test]
    fn rejects_non_integer_year() {
        for bad in [json!("mil novecientos"), json!(19.5), json!(true), json!(i64::MAX)] {
            let err = validate_new_book(dune(&bad)).unwrap_err();
            assert_matches!(err, CoreError::Validation(msg) if msg.contains("número entero"));
        }
    }
}
