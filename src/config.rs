//! Game configuration.
//!
//! Cache TTL and the catalog id ceiling are fixed; the rest can be overridden
//! from the environment.

use std::path::PathBuf;
use std::time::Duration;

/// Age after which a cached record is treated as absent.
pub const CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Exclusive upper bound for random target ids (generations 1 to 4).
pub const MAX_POKEMON_ID: u32 = 476;

/// Default PokéAPI endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default chat command prefix.
pub const DEFAULT_PREFIX: &str = "!joy";

/// Runtime configuration for the game core.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// SQLite database file backing the record cache.
    pub db_path: PathBuf,
    /// Base URL of the catalog API, without trailing slash.
    pub api_base_url: String,
    /// Bound applied to each of the three remote lookups.
    pub fetch_timeout: Duration,
    /// Messages must start with this to be treated as commands.
    pub command_prefix: String,
    /// Cap on random draws per selection. `None` retries forever.
    pub max_draw_attempts: Option<usize>,
    pub cache_ttl: Duration,
    pub max_pokemon_id: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("database.db"),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fetch_timeout: Duration::from_secs(10),
            command_prefix: DEFAULT_PREFIX.to_string(),
            max_draw_attempts: None,
            cache_ttl: CACHE_TTL,
            max_pokemon_id: MAX_POKEMON_ID,
        }
    }
}

impl GameConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// - `DEXGUESS_DB_PATH`
    /// - `POKEAPI_BASE_URL`
    /// - `DEXGUESS_FETCH_TIMEOUT_SECS`
    /// - `DEXGUESS_PREFIX`
    /// - `DEXGUESS_MAX_DRAWS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            db_path: lookup("DEXGUESS_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            api_base_url: lookup("POKEAPI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            fetch_timeout: lookup("DEXGUESS_FETCH_TIMEOUT_SECS")
                .and_then(|secs| secs.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            command_prefix: lookup("DEXGUESS_PREFIX").unwrap_or(defaults.command_prefix),
            max_draw_attempts: lookup("DEXGUESS_MAX_DRAWS")
                .and_then(|n| n.parse().ok())
                .filter(|n: &usize| *n > 0),
            ..defaults
        }
    }
}
