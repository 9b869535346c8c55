use std::{any::TypeId, collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::{
    catalog::{
        builder::{Catalog, build_catalog},
        render::OperationRecord,
    },
    domain::{error::ModelError, model::ServiceModel},
};

type CatalogCell = Arc<OnceCell<Arc<Catalog>>>;

/// Memoizes one [`Catalog`] per service-model type for the lifetime of the
/// cache. Entries are never invalidated.
pub struct CatalogCache {
    base_endpoint: String,
    entries: Mutex<HashMap<TypeId, CatalogCell>>,
}

impl CatalogCache {
    #[must_use]
    pub fn new(base_endpoint: impl Into<String>) -> Self {
        Self {
            base_endpoint: base_endpoint.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn base_endpoint(&self) -> &str {
        &self.base_endpoint
    }

    /// Visible records, or the hidden set when `hidden` is true. The two sets
    /// are never merged.
    pub async fn get_catalog<M: ServiceModel>(
        &self,
        model: &M,
        hidden: bool,
    ) -> Result<Arc<[OperationRecord]>, ModelError> {
        Ok(self.catalog(model).await?.records(hidden))
    }

    /// Builds the catalog for `M` on first use. Concurrent first requests for
    /// the same type wait for a single build; a failed instantiation is not
    /// cached.
    pub async fn catalog<M: ServiceModel>(&self, model: &M) -> Result<Arc<Catalog>, ModelError> {
        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(TypeId::of::<M>()).or_default())
        };

        if let Some(catalog) = cell.get() {
            debug!("operation catalog cache hit service={}", catalog.service);
            return Ok(Arc::clone(catalog));
        }

        let catalog = cell
            .get_or_try_init(|| async {
                let definition = model.instantiate()?;
                Ok::<_, ModelError>(Arc::new(build_catalog(&definition, &self.base_endpoint)))
            })
            .await?;

        Ok(Arc::clone(catalog))
    }
}
