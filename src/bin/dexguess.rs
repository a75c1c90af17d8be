//! Console adapter for the guessing game.
//!
//! Every stdin line is delivered as a chat message in room `console`;
//! replies are printed to stdout. Exits at end of input.
//!
//! # Environment Variables
//!
//! - `DEXGUESS_DB_PATH`: cache database (default: `database.db`)
//! - `POKEAPI_BASE_URL`: catalog endpoint (default: `https://pokeapi.co/api/v2`)
//! - `DEXGUESS_FETCH_TIMEOUT_SECS`: per-lookup bound (default: 10)
//! - `DEXGUESS_PREFIX`: command prefix (default: `!joy`)
//! - `DEXGUESS_MAX_DRAWS`: cap on random draws per round (default: unbounded)
//! - `RUST_LOG`: log filter (default: `info,dexguess=debug`)

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use dexguess::{
    ChatEvent, EnrichmentFetcher, GameConfig, GameHandler, Outbound, PokeApiClient, RecordCache,
    SessionSelector,
};

const ROOM: &str = "console";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("not loading .env file: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dexguess=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::from_env();

    let cache = RecordCache::open(&config.db_path, config.cache_ttl)
        .with_context(|| format!("can't open cache database {}", config.db_path.display()))?;
    let catalog = PokeApiClient::new(&config.api_base_url).context("can't build catalog client")?;

    let fetcher = Arc::new(EnrichmentFetcher::new(
        Arc::new(catalog),
        Arc::new(cache),
        config.fetch_timeout,
    ));
    let sessions = Arc::new(SessionSelector::new(
        fetcher,
        config.max_pokemon_id,
        config.max_draw_attempts,
    ));
    let handler = GameHandler::new(sessions, &config.command_prefix);

    tracing::info!(
        "dexguess is running. Type `{} <name>` to guess, Ctrl-D to exit.",
        config.command_prefix
    );

    let author = std::env::var("USER").unwrap_or_else(|_| "player".to_string());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = ChatEvent::new(ROOM, &author, &line);
        for reply in handler.handle(&event).await {
            print_reply(&reply);
        }
    }

    tracing::info!("end of input, shutting down");
    Ok(())
}

fn print_reply(reply: &Outbound) {
    match reply {
        Outbound::Text(text) => println!("{}", text),
        Outbound::Rich(rich) => {
            println!("== {} (#{:06X}) ==", rich.title, rich.color);
            print!("{}", rich.description);
            if let Some(url) = &rich.thumbnail_url {
                println!("{}", url);
            }
        }
    }
}
