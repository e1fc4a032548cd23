//! PostgreSQL catalog store.
//!
//! The table name is chosen at construction (per-environment or shared),
//! so every query is assembled with `format!` around a column list, the
//! same way the fixed-table repositories build theirs.

use async_trait::async_trait;
use biblioteca_core::catalog::NewBook;
use biblioteca_core::search::{like_pattern, normalize_term};
use biblioteca_core::seed::SeedBook;
use biblioteca_core::stats::BookStats;
use biblioteca_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{CatalogStore, StoreError, StoreResult};
use crate::models::book::Book;

/// Column list for catalog queries.
const COLUMNS: &str = "\
    id, titulo, autor, \"año\", genero, isbn, imagen_url, \
    disponible, fecha_creacion, fecha_actualizacion";

/// PostgreSQL identifiers are truncated past this length.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Whether `name` is safe to splice into SQL as an unquoted identifier.
///
/// ```
/// use biblioteca_db::store::postgres::is_valid_table_name;
///
/// assert!(is_valid_table_name("libros_dev"));
/// assert!(!is_valid_table_name("libros; DROP TABLE x"));
/// ```
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    starts_ok
        && name.len() <= MAX_IDENTIFIER_LEN
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Catalog backed by one PostgreSQL table.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
    table: String,
}

impl PgCatalogStore {
    /// Bind a store to `table`. The table is not created here; see
    /// [`crate::bootstrap`].
    pub fn new(pool: PgPool, table: impl Into<String>) -> StoreResult<Self> {
        let table = table.into();
        if !is_valid_table_name(&table) {
            return Err(StoreError::InvalidTableName(table));
        }
        Ok(Self { pool, table })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Drop the table and everything in it.
    pub async fn drop_table(&self) -> StoreResult<()> {
        let query = format!("DROP TABLE IF EXISTS {}", self.table);
        sqlx::query(&query).execute(&self.pool).await?;
        Ok(())
    }

    /// Whether the table currently exists.
    pub async fn table_exists(&self) -> StoreResult<bool> {
        let (exists,): (bool,) = sqlx::query_as("SELECT to_regclass($1) IS NOT NULL")
            .bind(&self.table)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    fn location(&self) -> &str {
        &self.table
    }

    async fn list_all(&self) -> StoreResult<Vec<Book>> {
        let query = format!("SELECT {COLUMNS} FROM {} ORDER BY id ASC", self.table);
        let books = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Book>> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", self.table);
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, book: &NewBook) -> StoreResult<Book> {
        let query = format!(
            "INSERT INTO {} (titulo, autor, \"año\", genero, isbn, disponible) \
             VALUES ($1, $2, $3, $4, $5, TRUE) \
             RETURNING {COLUMNS}",
            self.table
        );
        let created = sqlx::query_as::<_, Book>(&query)
            .bind(&book.titulo)
            .bind(&book.autor)
            .bind(book.anio)
            .bind(&book.genero)
            .bind(&book.isbn)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    /// `GREATEST` keeps `fecha_actualizacion` from moving backwards if the
    /// database clock does.
    async fn set_availability(&self, id: DbId, disponible: bool) -> StoreResult<Option<Book>> {
        let query = format!(
            "UPDATE {} SET \
                 disponible = $2, \
                 fecha_actualizacion = GREATEST(fecha_actualizacion, NOW()) \
             WHERE id = $1 \
             RETURNING {COLUMNS}",
            self.table
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(disponible)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn set_image(&self, id: DbId, imagen_url: &str) -> StoreResult<Option<Book>> {
        let query = format!(
            "UPDATE {} SET \
                 imagen_url = $2, \
                 fecha_actualizacion = GREATEST(fecha_actualizacion, NOW()) \
             WHERE id = $1 \
             RETURNING {COLUMNS}",
            self.table
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(imagen_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Book>> {
        let query = format!("DELETE FROM {} WHERE id = $1 RETURNING {COLUMNS}", self.table);
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Book>> {
        let Some(term) = normalize_term(Some(term)) else {
            return self.list_all().await;
        };

        let query = format!(
            "SELECT {COLUMNS} FROM {} \
             WHERE titulo ILIKE $1 OR autor ILIKE $1 OR genero ILIKE $1 \
             ORDER BY id ASC",
            self.table
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn statistics(&self) -> StoreResult<BookStats> {
        let query = format!(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE disponible) FROM {}",
            self.table
        );
        let (total, disponibles): (i64, i64) = sqlx::query_as(&query)
            .fetch_one(&self.pool)
            .await?;
        Ok(BookStats::from_counts(total, disponibles))
    }

    async fn count(&self) -> StoreResult<i64> {
        let query = format!("SELECT COUNT(*) FROM {}", self.table);
        let (count,): (i64,) = sqlx::query_as(&query).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn ensure_schema(&self) -> StoreResult<()> {
        let query = format!(
            "CREATE TABLE IF NOT EXISTS {} ( \
                 id BIGSERIAL PRIMARY KEY, \
                 titulo VARCHAR(255) NOT NULL, \
                 autor VARCHAR(255) NOT NULL, \
                 \"año\" INTEGER NOT NULL, \
                 genero VARCHAR(100) NOT NULL, \
                 isbn VARCHAR(20), \
                 imagen_url TEXT, \
                 disponible BOOLEAN NOT NULL DEFAULT TRUE, \
                 fecha_creacion TIMESTAMPTZ NOT NULL DEFAULT NOW(), \
                 fecha_actualizacion TIMESTAMPTZ NOT NULL DEFAULT NOW() \
             )",
            self.table
        );
        sqlx::query(&query).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_seed(&self, seed: &[SeedBook]) -> StoreResult<u64> {
        if seed.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} (titulo, autor, \"año\", genero, isbn, disponible) ",
            self.table
        ));
        builder.push_values(seed, |mut row, book| {
            row.push_bind(book.titulo)
                .push_bind(book.autor)
                .push_bind(book.anio)
                .push_bind(book.genero)
                .push_bind(book.isbn)
                .push_bind(book.disponible);
        });

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_tables_are_valid_identifiers() {
        for name in ["libros", "libros_dev", "libros_staging", "libros_prod", "_x1"] {
            assert!(is_valid_table_name(name), "{name} should be accepted");
        }
    }

    #[test]
    fn unsafe_identifiers_are_rejected() {
        for name in [
            "",
            "1libros",
            "Libros",
            "libros-dev",
            "libros dev",
            "libros;--",
            "libros\"x",
        ] {
            assert!(!is_valid_table_name(name), "{name:?} should be rejected");
        }
        assert!(!is_valid_table_name(&"a".repeat(MAX_IDENTIFIER_LEN + 1)));
    }
}
