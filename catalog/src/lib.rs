pub mod buckets;
pub mod errors;
pub mod loader;
pub mod query;

pub use loader::{Catalog, CatalogCache, catalog_cache, load_catalog, lookup_by_id};
