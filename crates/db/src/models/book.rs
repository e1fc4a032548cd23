//! Book model and request DTOs.

use biblioteca_core::catalog::{validate_new_book, BookInput, NewBook};
use biblioteca_core::error::CoreError;
use biblioteca_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from a `libros_*` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub titulo: String,
    pub autor: String,
    #[sqlx(rename = "año")]
    #[serde(rename = "año")]
    pub anio: i32,
    pub genero: String,
    pub isbn: Option<String>,
    pub imagen_url: Option<String>,
    pub disponible: bool,
    pub fecha_creacion: Timestamp,
    pub fecha_actualizacion: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Body of `POST /api/libros`.
///
/// Every field is optional at the wire level so that missing fields
/// produce a single validation message instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBook {
    pub titulo: Option<String>,
    pub autor: Option<String>,
    #[serde(rename = "año")]
    pub anio: Option<serde_json::Value>,
    pub genero: Option<String>,
    pub isbn: Option<String>,
}

impl CreateBook {
    /// Check required fields and normalise values.
    pub fn validate(&self) -> Result<NewBook, CoreError> {
        validate_new_book(BookInput {
            titulo: self.titulo.as_deref(),
            autor: self.autor.as_deref(),
            anio: self.anio.as_ref(),
            genero: self.genero.as_deref(),
            isbn: self.isbn.as_deref(),
        })
    }
}

/// Body of `PUT /api/libros/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAvailability {
    pub disponible: Option<bool>,
}

/// Query string of `GET /api/buscar`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}
