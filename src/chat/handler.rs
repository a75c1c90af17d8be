//! Game command handling.
//!
//! `!joy <name>` guesses, `!joy giveup` reveals the answer. A room gets its
//! first target on its first command.

use std::sync::Arc;

use super::{ChatEvent, Outbound, RichMessage, COLOR_GUESS, COLOR_SOLVED};
use crate::compare::compare;
use crate::record::{LookupKey, PokeRecord};
use crate::session::SessionSelector;

const USAGE: &str =
    "Guess the hidden pokemon with `<prefix> <name>`, or `<prefix> giveup` to reveal it.";
const SELECTION_FAILED: &str = "Couldn't pick a pokemon right now, try again later.";

/// Turns chat commands into game replies.
pub struct GameHandler {
    sessions: Arc<SessionSelector>,
    prefix: String,
}

impl GameHandler {
    pub fn new(sessions: Arc<SessionSelector>, prefix: &str) -> Self {
        Self {
            sessions,
            prefix: prefix.to_string(),
        }
    }

    pub fn sessions(&self) -> &SessionSelector {
        &self.sessions
    }

    /// Replies for `event`, in send order. Bot messages and messages without
    /// the prefix get none.
    pub async fn handle(&self, event: &ChatEvent) -> Vec<Outbound> {
        if event.is_bot {
            return Vec::new();
        }
        let Some(command) = event.text.strip_prefix(&self.prefix) else {
            return Vec::new();
        };
        let name = command.trim().to_lowercase();
        let room = event.room_id.as_str();
        log::info!("command from {} in room {}: {:?}", event.author_id, room, name);

        let answer = match self.sessions.target_or_select(room).await {
            Ok(answer) => answer,
            Err(e) => {
                log::error!("can't start a round in room {}: {}", room, e);
                return vec![Outbound::Text(SELECTION_FAILED.to_string())];
            }
        };

        if name.is_empty() {
            return vec![Outbound::Text(USAGE.replace("<prefix>", &self.prefix))];
        }

        if name == "giveup" || name == "give up" {
            self.next_round(room);
            return vec![Outbound::Text(answer.name.clone())];
        }

        if name == answer.name {
            self.next_round(room);
            return vec![rich_reply(&answer, &answer, COLOR_SOLVED)];
        }

        match self.sessions.fetcher().fetch(&LookupKey::name(&name)).await {
            Ok(guess) => vec![rich_reply(&answer, &guess, COLOR_GUESS)],
            Err(e) => {
                log::error!("can't get pokemon {} in room {}: {}", name, room, e);
                let similar = self.sessions.fetcher().suggest(&name).await;
                vec![Outbound::Text(format!(
                    "Not found pokemon name: {}\nSimilar pokemon name: {}",
                    name,
                    similar.join(", ")
                ))]
            }
        }
    }

    /// End the room's round and draw the next target in the background, so
    /// the reveal goes out without waiting on the catalog. Until the draw
    /// lands the room has no target; if it fails the room stays empty and
    /// the next command tries again.
    fn next_round(&self, room: &str) {
        self.sessions.clear(room);
        let sessions = Arc::clone(&self.sessions);
        let room = room.to_string();
        tokio::spawn(async move {
            if let Err(e) = sessions.select_random(&room).await {
                log::error!("can't start next round in room {}: {}", room, e);
            }
        });
    }
}

fn rich_reply(answer: &PokeRecord, guess: &PokeRecord, color: u32) -> Outbound {
    Outbound::Rich(RichMessage {
        title: guess.name.clone(),
        description: compare(answer, guess).report(),
        color,
        thumbnail_url: guess.sprite_url.clone(),
    })
}
