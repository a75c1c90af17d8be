//! # dexguess
//!
//! Core of a "guess the Pokémon" chat game. A hidden target is drawn at
//! random from PokéAPI; each guess is scored attribute by attribute against
//! it until someone names it.
//!
//! Records are assembled from three dependent lookups (pokemon, species,
//! evolution chain) and cached in SQLite for a week.

pub mod cache;
pub mod catalog;
pub mod chat;
pub mod compare;
pub mod config;
pub mod errors;
pub mod evolution;
pub mod fetcher;
pub mod record;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::RecordCache;
pub use catalog::{Catalog, PokeApiClient};
pub use chat::{ChatEvent, GameHandler, Outbound, RichMessage};
pub use compare::{compare, Comparison, Verdict};
pub use config::GameConfig;
pub use errors::{CacheError, CatalogError, DexError};
pub use fetcher::EnrichmentFetcher;
pub use record::{EvolutionNode, LookupKey, PokeRecord};
pub use session::SessionSelector;
