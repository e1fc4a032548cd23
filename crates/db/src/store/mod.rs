//! Catalog store abstraction.
//!
//! One trait, several bindings:
//! - [`PgCatalogStore`] over a per-environment table (`libros_{prefix}`)
//!   or the single shared `libros` table.
//! - [`MemoryCatalogStore`] for tests and database-less runs.
//!
//! Operations are independent and non-transactional. Lookups by id return
//! `Ok(None)` when the id is absent; callers decide how to report that.

use std::sync::Arc;

use async_trait::async_trait;
use biblioteca_core::catalog::NewBook;
use biblioteca_core::environment::{Environment, TABLE_BASE};
use biblioteca_core::error::CoreError;
use biblioteca_core::seed::SeedBook;
use biblioteca_core::stats::BookStats;
use biblioteca_core::types::DbId;

use crate::models::book::Book;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid table name '{0}'")]
    InvalidTableName(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Data access for one catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Where the catalog lives (table name, or `memory`).
    fn location(&self) -> &str;

    /// All books in ascending id order.
    async fn list_all(&self) -> StoreResult<Vec<Book>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Book>>;

    /// Insert a validated book. New books are always available.
    async fn create(&self, book: &NewBook) -> StoreResult<Book>;

    /// Set the availability flag and refresh `fecha_actualizacion`.
    async fn set_availability(&self, id: DbId, disponible: bool) -> StoreResult<Option<Book>>;

    /// Record an image URL and refresh `fecha_actualizacion`.
    async fn set_image(&self, id: DbId, imagen_url: &str) -> StoreResult<Option<Book>>;

    /// Hard-delete a book, returning the removed row.
    async fn delete(&self, id: DbId) -> StoreResult<Option<Book>>;

    /// Case-insensitive substring match over title, author and genre.
    ///
    /// A blank term behaves as [`CatalogStore::list_all`].
    async fn search(&self, term: &str) -> StoreResult<Vec<Book>>;

    async fn statistics(&self) -> StoreResult<BookStats>;

    async fn count(&self) -> StoreResult<i64>;

    /// Create the backing table if it does not exist.
    async fn ensure_schema(&self) -> StoreResult<()>;

    /// Insert seed rows as given, returning how many were written.
    async fn insert_seed(&self, seed: &[SeedBook]) -> StoreResult<u64>;

    /// Confirm the backend is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    /// Release backend resources (drains the connection pool).
    async fn close(&self);
}

/// How the catalog is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// One table per environment (`libros_dev`, `libros_staging`, `libros_prod`).
    EnvironmentTable,
    /// A single `libros` table shared by every environment.
    SharedTable,
    /// Process-local, lost on exit.
    Memory,
}

impl StorageBackend {
    /// Parse from the `CATALOG_BACKEND` setting.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "environment" | "env" => Ok(Self::EnvironmentTable),
            "shared" => Ok(Self::SharedTable),
            "memory" => Ok(Self::Memory),
            other => Err(CoreError::Validation(format!(
                "Unknown catalog backend '{other}'. Must be one of: environment, shared, memory"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::EnvironmentTable => "environment",
            Self::SharedTable => "shared",
            Self::Memory => "memory",
        }
    }

    /// Table backing `environment`, or `None` for the memory backend.
    pub fn table_name(self, environment: Environment) -> Option<String> {
        match self {
            Self::EnvironmentTable => Some(environment.table_name()),
            Self::SharedTable => Some(TABLE_BASE.to_string()),
            Self::Memory => None,
        }
    }

    pub fn requires_database(self) -> bool {
        !matches!(self, Self::Memory)
    }
}

/// Build the store for `backend`.
///
/// `pool` must be provided for the database-backed variants.
pub fn open_store(
    backend: StorageBackend,
    environment: Environment,
    pool: Option<crate::DbPool>,
) -> StoreResult<Arc<dyn CatalogStore>> {
    match (backend.table_name(environment), pool) {
        (Some(table), Some(pool)) => Ok(Arc::new(PgCatalogStore::new(pool, table)?)),
        (Some(table), None) => Err(StoreError::Database(sqlx::Error::Configuration(
            format!("a database pool is required for table '{table}'").into(),
        ))),
        (None, _) => Ok(Arc::new(MemoryCatalogStore::new())),
    }
}
