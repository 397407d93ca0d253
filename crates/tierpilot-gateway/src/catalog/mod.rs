//! Catalog sources.
//!
//! The engine only sees a fully loaded [`Catalog`]; where it comes from
//! (a directory of JSON files, embedded data) is decided here. Each call to
//! `load` produces a fresh snapshot owned by one evaluation.

pub mod fs;

use std::sync::Arc;

use async_trait::async_trait;

use tierpilot_core::error::Result;
use tierpilot_core::Catalog;

pub use fs::FsCatalog;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Load a complete snapshot. Missing record sources are empty, not errors.
    async fn load(&self) -> Result<Catalog>;

    /// Readiness check.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Pre-built in-memory catalog.
#[derive(Clone, Default)]
pub struct StaticCatalog {
    catalog: Arc<Catalog>,
}

impl StaticCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn load(&self) -> Result<Catalog> {
        Ok(Catalog::clone(&self.catalog))
    }
}
