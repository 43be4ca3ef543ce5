use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tokio::sync::OnceCell;
use tracing::debug;

use super::loader::{CatalogError, CatalogLoader, CatalogSource};
use crate::models::GameRecord;

/// Immutable, shareable snapshot of a loaded catalog.
pub type Catalog = Arc<[GameRecord]>;

static GLOBAL: Lazy<CatalogCache> = Lazy::new(CatalogCache::new);

type Slot = Arc<OnceCell<Catalog>>;

/// Load-once accessor for catalogs, keyed by source location.
///
/// Concurrent requests for one source share a single read. Failed loads are
/// not remembered, so the next request reads again.
#[derive(Clone, Default)]
pub struct CatalogCache {
    inner: Arc<RwLock<HashMap<CatalogSource, Slot>>>,
}

impl CatalogCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache shared by every view.
    pub fn global() -> &'static CatalogCache {
        &GLOBAL
    }

    /// Snapshot for `source`, if it has been loaded.
    pub fn get(&self, source: &CatalogSource) -> Option<Catalog> {
        self.inner.read().get(source)?.get().cloned()
    }

    fn slot(&self, source: &CatalogSource) -> Slot {
        if let Some(slot) = self.inner.read().get(source) {
            return slot.clone();
        }
        self.inner
            .write()
            .entry(source.clone())
            .or_default()
            .clone()
    }

    /// Return the cached snapshot or load it through `loader`.
    ///
    /// Callers arriving while a load is in flight wait for it instead of
    /// reading the source again.
    pub async fn get_or_load(&self, loader: &CatalogLoader) -> Result<Catalog, CatalogError> {
        let slot = self.slot(loader.source());
        if let Some(catalog) = slot.get() {
            debug!(source = %loader.source(), "Catalog served from cache");
            return Ok(catalog.clone());
        }

        let catalog = slot
            .get_or_try_init(|| async {
                let records = loader.fetch().await?;
                Ok::<_, CatalogError>(Catalog::from(records))
            })
            .await?;
        Ok(catalog.clone())
    }
}
