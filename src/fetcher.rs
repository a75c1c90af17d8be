//! Enrichment fetcher: cache first, then pokemon → species → evolution chain.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::RecordCache;
use crate::catalog::{resource_id, Catalog};
use crate::errors::{CatalogError, DexError, FetchStep, Result};
use crate::record::{LookupKey, PokeRecord};

/// Assembles [`PokeRecord`]s from the catalog, backed by the record cache.
pub struct EnrichmentFetcher {
    catalog: Arc<dyn Catalog>,
    cache: Arc<RecordCache>,
    step_timeout: Duration,
}

impl EnrichmentFetcher {
    pub fn new(catalog: Arc<dyn Catalog>, cache: Arc<RecordCache>, step_timeout: Duration) -> Self {
        Self {
            catalog,
            cache,
            step_timeout,
        }
    }

    pub fn cache(&self) -> &Arc<RecordCache> {
        &self.cache
    }

    /// Return the record for `key`, from cache when fresh.
    ///
    /// On a miss the three lookups run in sequence, each bounded by the step
    /// timeout, and any failure aborts the whole fetch. A successful result is
    /// written back to the cache in the background.
    pub async fn fetch(&self, key: &LookupKey) -> Result<PokeRecord> {
        match self.cache.aget(key.clone()).await {
            Ok(Some(record)) => {
                log::info!("load pokemon from cache: {} ({})", record.name, record.id);
                return Ok(record);
            }
            Ok(None) => {}
            Err(e) => log::error!("can't load pokemon {} from cache: {}", key, e),
        }

        let id_or_name = key.to_string();
        let pokemon = self
            .step(FetchStep::Pokemon, self.catalog.pokemon(&id_or_name))
            .await
            .map_err(|e| match e {
                DexError::RemoteFetch {
                    source: CatalogError::NotFound(_),
                    ..
                } => DexError::NotFoundInCatalog(id_or_name.clone()),
                other => other,
            })?;

        let species = self
            .step(FetchStep::Species, self.catalog.species(&pokemon.species.name))
            .await?;

        let chain_id = resource_id(&species.evolution_chain.url, "evolution-chain").map_err(
            |source| DexError::RemoteFetch {
                step: FetchStep::EvolutionChain,
                source,
            },
        )?;
        let chain = self
            .step(FetchStep::EvolutionChain, self.catalog.evolution_chain(chain_id))
            .await?;

        let record = PokeRecord::assemble(pokemon, species, chain);
        log::info!("fetched pokemon {} ({})", record.name, record.id);

        // Detached; the caller never waits on the write.
        self.cache.spawn_put(record.clone());

        Ok(record)
    }

    /// Names resembling `query`. Failures are logged and yield no suggestions.
    pub async fn suggest(&self, query: &str) -> Vec<String> {
        match tokio::time::timeout(self.step_timeout, self.catalog.search(query)).await {
            Ok(Ok(names)) => names,
            Ok(Err(e)) => {
                log::error!("can't search pokemon {}: {}", query, e);
                Vec::new()
            }
            Err(_) => {
                log::error!("search for {} timed out after {:?}", query, self.step_timeout);
                Vec::new()
            }
        }
    }

    async fn step<T>(
        &self,
        step: FetchStep,
        call: impl Future<Output = std::result::Result<T, CatalogError>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.step_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => {
                log::error!("can't get {}: {}", step, source);
                Err(DexError::RemoteFetch { step, source })
            }
            Err(_) => {
                log::error!("{} lookup timed out after {:?}", step, self.step_timeout);
                Err(DexError::Timeout {
                    step,
                    after: self.step_timeout,
                })
            }
        }
    }
}
