//! Catalog loading, caching and filtering.

/// Load-once catalog cache shared by the views.
pub mod cache;
/// Category filter tags.
pub mod filter;
/// Reading the catalog from its static source.
pub mod loader;
/// Loaded records plus the active filter.
pub mod store;

pub use cache::{Catalog, CatalogCache};
pub use filter::{visible, FilterTag};
pub use loader::{parse_catalog, CatalogError, CatalogLoader, CatalogSource};
pub use store::CatalogStore;
