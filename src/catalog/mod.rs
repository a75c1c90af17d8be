//! Remote catalog boundary.
//!
//! The enrichment fetcher only talks to the [`Catalog`] trait; the HTTP
//! implementation lives in [`pokeapi`].

pub mod pokeapi;
pub mod types;

use async_trait::async_trait;

use crate::errors::CatalogError;

pub use pokeapi::PokeApiClient;
pub use types::{ChainLink, EvolutionChain, NamedResource, Pokemon, PokemonSpecies};

/// Read-only access to the pokemon catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch a pokemon by numeric id or by name.
    async fn pokemon(&self, id_or_name: &str) -> Result<Pokemon, CatalogError>;

    /// Fetch the species record named by a pokemon's species reference.
    async fn species(&self, name: &str) -> Result<PokemonSpecies, CatalogError>;

    /// Fetch an evolution chain by id.
    async fn evolution_chain(&self, id: u32) -> Result<EvolutionChain, CatalogError>;

    /// Names similar to `query`, used for suggestions after a failed guess.
    async fn search(&self, query: &str) -> Result<Vec<String>, CatalogError>;
}

/// Extract the id from a reference URL such as
/// `https://pokeapi.co/api/v2/evolution-chain/67/`.
///
/// Everything up to and including `/{kind}/` is stripped along with the
/// trailing slash, and the remainder must be a number.
pub fn resource_id(url: &str, kind: &str) -> Result<u32, CatalogError> {
    let marker = format!("/{}/", kind);
    let tail = url
        .find(&marker)
        .map(|at| &url[at + marker.len()..])
        .ok_or_else(|| CatalogError::BadReference(url.to_string()))?;

    tail.trim_end_matches('/')
        .parse()
        .map_err(|_| CatalogError::BadReference(url.to_string()))
}
