//! Handlers for the book catalog.
//!
//! Extractor rejections are taken as `Result` so malformed ids, bodies and
//! query strings come back in the same error envelope as everything else.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use biblioteca_core::error::CoreError;
use biblioteca_core::types::DbId;
use biblioteca_core::upload::{self, IMAGE_FIELD};
use biblioteca_db::models::book::{CreateBook, SearchParams, UpdateAvailability};
use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

const ENTITY: &str = "Libro";

fn book_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/libros
///
/// Every book in ascending id order, with the total and available counts.
pub async fn list_books(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let books = state.store.list_all().await?;
    let disponibles = books.iter().filter(|b| b.disponible).count();

    Ok(Json(ListResponse::with_available(books, disponibles)))
}

/// GET /api/libros/{id}
pub async fn get_book(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let book = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| book_not_found(id))?;

    Ok(Json(DataResponse::new(book)))
}

/// GET /api/estadisticas
pub async fn statistics(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = state.store.statistics().await?;
    Ok(Json(DataResponse::new(stats)))
}

/// GET /api/buscar?q=term
///
/// A missing or blank `q` returns the whole catalog.
pub async fn search_books(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query?;
    let term = params.q.unwrap_or_default();
    let books = state.store.search(&term).await?;

    tracing::debug!(term = %term, matches = books.len(), "Catalog searched");

    Ok(Json(ListResponse::new(books)))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/libros
///
/// Validates the required fields and stores the book as available.
/// Returns 201 with the stored record.
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<CreateBook>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    let new_book = input.validate()?;
    let book = state.store.create(&new_book).await?;

    tracing::info!(book_id = book.id, titulo = %book.titulo, "Book created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message("Libro agregado exitosamente", book)),
    ))
}

/// PUT /api/libros/{id}
///
/// Only `disponible` is updatable; other fields in the body are ignored.
pub async fn update_availability(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    body: Result<Json<UpdateAvailability>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let Json(input) = body?;
    let disponible = input.disponible.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Falta el campo requerido: disponible".to_string(),
        ))
    })?;

    let book = state
        .store
        .set_availability(id, disponible)
        .await?
        .ok_or_else(|| book_not_found(id))?;

    tracing::info!(book_id = id, disponible, "Book availability updated");

    Ok(Json(DataResponse::with_message(
        "Estado actualizado correctamente",
        book,
    )))
}

/// DELETE /api/libros/{id}
///
/// Hard delete. Returns the removed record.
pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let book = state
        .store
        .delete(id)
        .await?
        .ok_or_else(|| book_not_found(id))?;

    tracing::info!(book_id = id, "Book deleted");

    Ok(Json(DataResponse::with_message(
        "Libro eliminado correctamente",
        book,
    )))
}

/// POST /api/libros/{id}/imagen
///
/// Accepts a multipart upload in the `imagen` field. The file itself is
/// discarded; the book records a placeholder URL derived from its id, the
/// upload time and the MIME type.
pub async fn upload_image(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let mut multipart = multipart?;

    let mut accepted: Option<String> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        upload::validate_image(content_type.as_deref(), data.len())?;

        tracing::debug!(book_id = id, bytes = data.len(), "Image received");
        accepted = content_type;
        break;
    }

    let content_type = accepted.ok_or_else(|| {
        AppError::Core(CoreError::UploadRejected(format!(
            "No se recibió ninguna imagen en el campo '{IMAGE_FIELD}'"
        )))
    })?;

    let url = upload::placeholder_image_url(id, &content_type, Utc::now());
    let book = state
        .store
        .set_image(id, &url)
        .await?
        .ok_or_else(|| book_not_found(id))?;

    tracing::info!(book_id = id, imagen_url = %url, "Book image updated");

    Ok(Json(DataResponse::with_message(
        "Imagen actualizada correctamente",
        book,
    )))
}
