//! Shared application state for the tierpilot service.

use std::sync::Arc;

use crate::catalog::{CatalogSource, FsCatalog};
use crate::config::ServiceConfig;
use crate::obs::ServiceMetrics;

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<dyn CatalogSource>,
    metrics: Arc<ServiceMetrics>,
}

impl AppState {
    /// State backed by the filesystem catalog named in the config.
    pub fn from_config(cfg: &ServiceConfig) -> Self {
        let source = FsCatalog::from_config(&cfg.catalog);
        tracing::info!(root = %source.root().display(), "catalog source configured");
        Self::new(Arc::new(source))
    }

    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self {
            catalog,
            metrics: Arc::new(ServiceMetrics::default()),
        }
    }

    pub fn catalog(&self) -> &dyn CatalogSource {
        self.catalog.as_ref()
    }

    pub fn metrics(&self) -> Arc<ServiceMetrics> {
        Arc::clone(&self.metrics)
    }
}
