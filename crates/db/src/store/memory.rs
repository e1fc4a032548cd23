//! In-memory catalog store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use biblioteca_core::catalog::NewBook;
use biblioteca_core::search::{matches_any, normalize_term};
use biblioteca_core::seed::SeedBook;
use biblioteca_core::stats::BookStats;
use biblioteca_core::types::{DbId, Timestamp};
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CatalogStore, StoreResult};
use crate::models::book::Book;

/// Catalog kept in an ordered map, so iteration is ascending by id.
///
/// Ids start at 1 and are never reused, even after deletes.
#[derive(Debug)]
pub struct MemoryCatalogStore {
    state: RwLock<MemoryState>,
}

#[derive(Debug)]
struct MemoryState {
    books: BTreeMap<DbId, Book>,
    next_id: DbId,
}

impl MemoryState {
    fn insert(
        &mut self,
        titulo: &str,
        autor: &str,
        anio: i32,
        genero: &str,
        isbn: Option<&str>,
        disponible: bool,
    ) -> Book {
        let id = self.next_id;
        self.next_id += 1;
        let now = Utc::now();
        let book = Book {
            id,
            titulo: titulo.to_string(),
            autor: autor.to_string(),
            anio,
            genero: genero.to_string(),
            isbn: isbn.map(str::to_string),
            imagen_url: None,
            disponible,
            fecha_creacion: now,
            fecha_actualizacion: now,
        };
        self.books.insert(id, book.clone());
        book
    }

    /// Apply `update` to a book and bump its update timestamp.
    fn touch(&mut self, id: DbId, update: impl FnOnce(&mut Book)) -> Option<Book> {
        let book = self.books.get_mut(&id)?;
        update(book);
        book.fecha_actualizacion = later_of(book.fecha_actualizacion, Utc::now());
        Some(book.clone())
    }
}

fn later_of(current: Timestamp, now: Timestamp) -> Timestamp {
    current.max(now)
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                books: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// A store pre-populated with `seed`.
    pub fn seeded(seed: &[SeedBook]) -> Self {
        let mut state = MemoryState {
            books: BTreeMap::new(),
            next_id: 1,
        };
        for book in seed {
            state.insert(
                book.titulo,
                book.autor,
                book.anio,
                book.genero,
                Some(book.isbn),
                book.disponible,
            );
        }
        Self {
            state: RwLock::new(state),
        }
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    fn location(&self) -> &str {
        "memory"
    }

    async fn list_all(&self) -> StoreResult<Vec<Book>> {
        let state = self.state.read().await;
        Ok(state.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Book>> {
        let state = self.state.read().await;
        Ok(state.books.get(&id).cloned())
    }

    async fn create(&self, book: &NewBook) -> StoreResult<Book> {
        let mut state = self.state.write().await;
        Ok(state.insert(
            &book.titulo,
            &book.autor,
            book.anio,
            &book.genero,
            book.isbn.as_deref(),
            true,
        ))
    }

    async fn set_availability(&self, id: DbId, disponible: bool) -> StoreResult<Option<Book>> {
        let mut state = self.state.write().await;
        Ok(state.touch(id, |book| book.disponible = disponible))
    }

    async fn set_image(&self, id: DbId, imagen_url: &str) -> StoreResult<Option<Book>> {
        let mut state = self.state.write().await;
        Ok(state.touch(id, |book| book.imagen_url = Some(imagen_url.to_string())))
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Book>> {
        let mut state = self.state.write().await;
        Ok(state.books.remove(&id))
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Book>> {
        let Some(term) = normalize_term(Some(term)) else {
            return self.list_all().await;
        };

        let state = self.state.read().await;
        Ok(state
            .books
            .values()
            .filter(|b| {
                matches_any(
                    &[b.titulo.as_str(), b.autor.as_str(), b.genero.as_str()],
                    term,
                )
            })
            .cloned()
            .collect())
    }

    async fn statistics(&self) -> StoreResult<BookStats> {
        let state = self.state.read().await;
        let total = state.books.len() as i64;
        let disponibles = state.books.values().filter(|b| b.disponible).count() as i64;
        Ok(BookStats::from_counts(total, disponibles))
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.state.read().await.books.len() as i64)
    }

    async fn ensure_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_seed(&self, seed: &[SeedBook]) -> StoreResult<u64> {
        let mut state = self.state.write().await;
        for book in seed {
            state.insert(
                book.titulo,
                book.autor,
                book.anio,
                book.genero,
                Some(book.isbn),
                book.disponible,
            );
        }
        Ok(seed.len() as u64)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}
