pub mod books;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /libros                 list, create
/// /libros/{id}            get, update availability, delete
/// /libros/{id}/imagen     cover image upload (POST, multipart)
///
/// /estadisticas           catalog statistics
/// /buscar?q=              search by title, author or genre
///
/// /environment            environment profile
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog CRUD and image upload.
        .nest("/libros", books::router())
        // Aggregates and search over the whole catalog.
        .route("/estadisticas", get(handlers::books::statistics))
        .route("/buscar", get(handlers::books::search_books))
        // Environment badge and feature flags.
        .route("/environment", get(handlers::environment::get_environment))
}
