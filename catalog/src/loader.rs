use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
    sync::{LazyLock, Mutex, OnceLock, PoisonError},
};

use common::catalog_item::CatalogItem;
use tracing::{debug, info};

use crate::errors::CatalogError;

const DEFAULT_CATALOG_PATH: &str = "data/plugins.json";

static CATALOG_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var("CATALOG_PATH")
        .unwrap_or(DEFAULT_CATALOG_PATH.into())
        .into()
});

static CATALOG: LazyLock<CatalogCache> =
    LazyLock::new(|| CatalogCache::new(CATALOG_PATH.clone()));

/// A fully validated catalog: every item passed the schema and ids are unique.
#[derive(Debug)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Runs the uniqueness pass, failing on the first repeated id.
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), position).is_some() {
                return Err(CatalogError::Integrity(item.id.clone()));
            }
        }

        Ok(Self { items, index })
    }

    /// The artifact is one unit: a single malformed item rejects the whole array.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let items: Vec<CatalogItem> = serde_json::from_str(raw)?;

        Self::from_items(items)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&raw)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn lookup_by_id(&self, id: &str) -> Option<&CatalogItem> {
        self.index.get(id).map(|&position| &self.items[position])
    }
}

/// Read-through cache over one artifact path.
///
/// The first successful load is kept for the lifetime of the cache and there
/// is no way to refresh it. A failed load is not stored, so the next call tries
/// again. Concurrent first calls serialize on `init_lock` and parse once.
pub struct CatalogCache {
    path: PathBuf,
    catalog: OnceLock<Catalog>,
    init_lock: Mutex<()>,
}

impl CatalogCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            catalog: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The catalog if a load already succeeded. Never touches the disk.
    pub fn loaded(&self) -> Option<&Catalog> {
        self.catalog.get()
    }

    /// Blocks on file I/O and parsing the first time through.
    pub fn get(&self) -> Result<&Catalog, CatalogError> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog);
        }

        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // another caller may have finished loading while we waited
        if let Some(catalog) = self.catalog.get() {
            debug!("Catalog loaded by a concurrent caller");
            return Ok(catalog);
        }

        let catalog = Catalog::from_path(&self.path)?;

        info!(
            "Loaded {} catalog entries from {}",
            catalog.len(),
            self.path.display()
        );

        Ok(self.catalog.get_or_init(|| catalog))
    }
}

/// Process-wide cache, configured by `CATALOG_PATH`.
pub fn catalog_cache() -> &'static CatalogCache {
    &CATALOG
}

pub fn load_catalog() -> Result<&'static Catalog, CatalogError> {
    CATALOG.get()
}

/// `Ok(None)` is the normal not-found outcome.
pub fn lookup_by_id(id: &str) -> Result<Option<&'static CatalogItem>, CatalogError> {
    Ok(load_catalog()?.lookup_by_id(id))
}
