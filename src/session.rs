//! Per-room game state: the hidden target each room is guessing.

use std::sync::Arc;

use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::{DexError, Result};
use crate::fetcher::EnrichmentFetcher;
use crate::record::{LookupKey, PokeRecord};

/// Holds the active target per room and draws new ones at random.
///
/// Last write per room wins. Map guards are never held across an `.await`.
pub struct SessionSelector {
    fetcher: Arc<EnrichmentFetcher>,
    targets: DashMap<String, Arc<PokeRecord>>,
    max_pokemon_id: u32,
    max_draw_attempts: Option<usize>,
}

impl SessionSelector {
    /// `max_pokemon_id` is exclusive. With `max_draw_attempts` unset a
    /// selection retries until the catalog answers.
    pub fn new(
        fetcher: Arc<EnrichmentFetcher>,
        max_pokemon_id: u32,
        max_draw_attempts: Option<usize>,
    ) -> Self {
        Self {
            fetcher,
            targets: DashMap::new(),
            max_pokemon_id,
            max_draw_attempts,
        }
    }

    pub fn fetcher(&self) -> &EnrichmentFetcher {
        &self.fetcher
    }

    /// The room's current target, if a round is running.
    pub fn target(&self, room: &str) -> Option<Arc<PokeRecord>> {
        self.targets.get(room).map(|entry| Arc::clone(entry.value()))
    }

    pub fn set_target(&self, room: &str, record: PokeRecord) -> Arc<PokeRecord> {
        let record = Arc::new(record);
        self.targets.insert(room.to_string(), Arc::clone(&record));
        record
    }

    /// End the room's round without starting another.
    pub fn clear(&self, room: &str) -> Option<Arc<PokeRecord>> {
        self.targets.remove(room).map(|(_, record)| record)
    }

    /// The room's current target, drawing one first if there is none.
    pub async fn target_or_select(&self, room: &str) -> Result<Arc<PokeRecord>> {
        match self.target(room) {
            Some(record) => Ok(record),
            None => self.select_random(room).await,
        }
    }

    /// Draw ids uniformly from `1..max_pokemon_id` until one resolves, then
    /// make it the room's target.
    pub async fn select_random(&self, room: &str) -> Result<Arc<PokeRecord>> {
        let upper = self.max_pokemon_id.max(2);
        let mut rng = StdRng::from_entropy();
        self.select_with(room, move || rng.gen_range(1..upper)).await
    }

    /// [`select_random`](Self::select_random) with the id source supplied by
    /// the caller.
    pub async fn select_with(
        &self,
        room: &str,
        mut draw: impl FnMut() -> u32 + Send,
    ) -> Result<Arc<PokeRecord>> {
        let mut attempts = 0;
        loop {
            if let Some(cap) = self.max_draw_attempts {
                if attempts >= cap {
                    log::error!(
                        "giving up on random pokemon for room {} after {} draws",
                        room,
                        attempts
                    );
                    return Err(DexError::DrawExhausted(attempts));
                }
            }
            attempts += 1;

            let id = draw();
            log::info!("random pokemon for room {}: id {}", room, id);

            match self.fetcher.fetch(&LookupKey::Id(id)).await {
                Ok(record) => {
                    log::info!(
                        "finish random pokemon for room {}: {} ({}) after {} draws",
                        room,
                        record.name,
                        record.id,
                        attempts
                    );
                    return Ok(self.set_target(room, record));
                }
                Err(e) => {
                    log::error!("can't find pokemon {} from random for room {}: {}", id, room, e);
                }
            }
        }
    }
}
