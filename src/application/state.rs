use std::{sync::Arc, time::Instant};

use serde_json::{Value, json};

use crate::{
    application::{config::RuntimeConfig, model_file::ModelFile},
    catalog::{CatalogCache, OperationRecord},
    domain::error::ModelError,
};

#[derive(Clone)]
pub struct SharedState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: RuntimeConfig,
    model: ModelFile,
    catalogs: CatalogCache,
    started_at: Instant,
}

impl SharedState {
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            inner: Arc::new(InnerState {
                model: ModelFile::new(config.model_path.clone()),
                catalogs: CatalogCache::new(config.base_endpoint.clone()),
                started_at: Instant::now(),
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn uptime_ms(&self) -> u64 {
        u64::try_from(self.inner.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub async fn operations(&self, hidden: bool) -> Result<Arc<[OperationRecord]>, ModelError> {
        self.inner
            .catalogs
            .get_catalog(&self.inner.model, hidden)
            .await
    }

    pub async fn health_payload(&self) -> Result<Value, ModelError> {
        let catalog = self.inner.catalogs.catalog(&self.inner.model).await?;
        Ok(json!({
            "ok": true,
            "service": catalog.service,
            "baseEndpoint": self.inner.catalogs.base_endpoint(),
            "operations": {
                "visible": catalog.visible.len(),
                "hidden": catalog.hidden.len(),
                "skipped": catalog.skipped.len(),
            },
            "uptimeMs": self.uptime_ms(),
        }))
    }
}
