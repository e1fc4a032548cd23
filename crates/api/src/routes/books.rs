use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use biblioteca_core::upload::MAX_IMAGE_BYTES;

use crate::handlers::books;
use crate::state::AppState;

/// Body limit for the upload route: the image limit plus room for
/// multipart framing.
const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

/// Book routes mounted at `/libros`.
///
/// ```text
/// GET    /              -> list_books
/// POST   /              -> create_book
/// GET    /{id}          -> get_book
/// PUT    /{id}          -> update_availability
/// DELETE /{id}          -> delete_book
/// POST   /{id}/imagen   -> upload_image (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(books::list_books).post(books::create_book))
        .route(
            "/{id}",
            get(books::get_book)
                .put(books::update_availability)
                .delete(books::delete_book),
        )
        .route(
            "/{id}/imagen",
            post(books::upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}
