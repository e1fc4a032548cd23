//! Request handlers.
//!
//! Handlers delegate to the [`biblioteca_db::store::CatalogStore`] held in
//! [`crate::state::AppState`] and map errors via [`crate::error::AppError`].

pub mod books;
pub mod environment;

use crate::error::AppError;

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}
