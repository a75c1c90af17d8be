//! Error types for the enrichment and scoring core.
//!
//! A cache miss is not an error: lookups return `Ok(None)` for both absent
//! and expired rows. Everything here is a genuine failure.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by the SQLite cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Statement or connection failure.
    #[error("cache storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The database directory could not be created.
    #[error("cache directory error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored payload could not be encoded or decoded.
    #[error("cache payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// The stored `updated_at` column is not valid RFC 3339.
    #[error("cache timestamp error: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// The blocking task running the statement panicked or was cancelled.
    #[error("cache task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors raised by a [`Catalog`](crate::catalog::Catalog) implementation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no resource at this path.
    #[error("catalog resource not found: {0}")]
    NotFound(String),

    /// Non-success HTTP status other than 404.
    #[error("catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Transport or body decoding failure.
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A reference URL did not carry the expected trailing id.
    #[error("malformed catalog reference: {0}")]
    BadReference(String),
}

/// One of the three dependent lookups that make up an aggregate fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStep {
    Pokemon,
    Species,
    EvolutionChain,
}

impl fmt::Display for FetchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pokemon => write!(f, "pokemon"),
            Self::Species => write!(f, "pokemon-species"),
            Self::EvolutionChain => write!(f, "evolution-chain"),
        }
    }
}

/// Top-level error for the game core.
#[derive(Debug, Error)]
pub enum DexError {
    /// Cache read/write/deserialize failure. Reads downgrade this to a miss.
    #[error(transparent)]
    CacheIo(#[from] CacheError),

    /// A remote lookup failed and the aggregate fetch was aborted.
    #[error("{step} lookup failed: {source}")]
    RemoteFetch {
        step: FetchStep,
        #[source]
        source: CatalogError,
    },

    /// A remote lookup exceeded its time bound.
    #[error("{step} lookup timed out after {after:?}")]
    Timeout { step: FetchStep, after: Duration },

    /// The evolution tree walk ended without finding the name.
    #[error("can't find evolution stage for {0}")]
    StageNotFound(String),

    /// The guessed name does not resolve to a catalog entry.
    #[error("not found pokemon: {0}")]
    NotFoundInCatalog(String),

    /// The configured cap on random draws was reached.
    #[error("no pokemon could be drawn after {0} attempts")]
    DrawExhausted(usize),
}

pub type Result<T> = std::result::Result<T, DexError>;
