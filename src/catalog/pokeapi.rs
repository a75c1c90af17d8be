//! PokéAPI HTTP client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use super::types::{EvolutionChain, Pokemon, PokemonSpecies, ResourceList};
use super::Catalog;
use crate::errors::CatalogError;

/// Upper bound passed as `limit` when listing every pokemon name.
const NAME_INDEX_LIMIT: u32 = 100_000;

/// [`Catalog`] implementation backed by the public PokéAPI REST service.
///
/// Per-request timeouts are left to the caller (the enrichment fetcher wraps
/// each step), so the inner `reqwest::Client` is built without one.
#[derive(Debug)]
pub struct PokeApiClient {
    base_url: String,
    http: reqwest::Client,
    /// Full list of pokemon names, loaded on the first search.
    names: OnceCell<Vec<String>>,
}

impl PokeApiClient {
    /// Create a client for `base_url`, e.g. `https://pokeapi.co/api/v2`.
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("dexguess/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            names: OnceCell::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(resp.json::<T>().await?)
    }

    async fn name_index(&self) -> Result<&Vec<String>, CatalogError> {
        self.names
            .get_or_try_init(|| async {
                let list: ResourceList = self
                    .get_json(&format!("pokemon?offset=0&limit={}", NAME_INDEX_LIMIT))
                    .await?;
                log::info!("loaded pokemon name index ({} entries)", list.results.len());
                Ok::<_, CatalogError>(list.results.into_iter().map(|r| r.name).collect())
            })
            .await
    }
}

#[async_trait]
impl Catalog for PokeApiClient {
    async fn pokemon(&self, id_or_name: &str) -> Result<Pokemon, CatalogError> {
        self.get_json(&format!("pokemon/{}", id_or_name)).await
    }

    async fn species(&self, name: &str) -> Result<PokemonSpecies, CatalogError> {
        self.get_json(&format!("pokemon-species/{}", name)).await
    }

    async fn evolution_chain(&self, id: u32) -> Result<EvolutionChain, CatalogError> {
        self.get_json(&format!("evolution-chain/{}", id)).await
    }

    async fn search(&self, query: &str) -> Result<Vec<String>, CatalogError> {
        let names = self.name_index().await?;
        Ok(filter_names(names, query))
    }
}

/// Names containing `query` as a substring, in catalog order.
fn filter_names(names: &[String], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    names
        .iter()
        .filter(|name| name.contains(&query))
        .cloned()
        .collect()
}
