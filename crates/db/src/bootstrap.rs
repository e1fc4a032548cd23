//! One-time schema creation and seeding.
//!
//! Runs at process start (and from the admin tool). A table that already
//! holds rows is never modified.

use biblioteca_core::seed::SeedBook;

use crate::store::{CatalogStore, PgCatalogStore, StoreResult};

/// Outcome of bootstrapping one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Table name, or `memory`.
    pub location: String,
    /// Rows present before seeding.
    pub existing: i64,
    /// Seed rows inserted (zero unless the table was empty).
    pub inserted: u64,
}

impl BootstrapReport {
    pub fn seeded(&self) -> bool {
        self.inserted > 0
    }
}

/// Insert `seed` only if the catalog holds no rows.
pub async fn seed_if_empty(store: &dyn CatalogStore, seed: &[SeedBook]) -> StoreResult<BootstrapReport> {
    let location = store.location().to_string();

    let existing = store.count().await?;
    let inserted = if existing == 0 {
        let inserted = store.insert_seed(seed).await?;
        tracing::info!(table = %location, inserted, "Empty catalog seeded");
        inserted
    } else {
        tracing::info!(table = %location, existing, "Catalog already populated, seed skipped");
        0
    };

    Ok(BootstrapReport {
        location,
        existing,
        inserted,
    })
}

/// Ensure the catalog exists and seed it if empty.
pub async fn bootstrap(store: &dyn CatalogStore, seed: &[SeedBook]) -> StoreResult<BootstrapReport> {
    store.ensure_schema().await?;
    tracing::info!(table = %store.location(), "Catalog table verified");

    seed_if_empty(store, seed).await
}

/// Drop the catalog table. The next [`bootstrap`] recreates and reseeds it.
pub async fn reset(store: &PgCatalogStore) -> StoreResult<()> {
    store.drop_table().await?;
    tracing::warn!(table = %store.table(), "Catalog table dropped");
    Ok(())
}
