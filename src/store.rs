//! In-memory fixture store: one board per tournament event.

use crate::models::{EventBoard, EventKey, FixtureId, MatchConfig, MatchKey};
use std::collections::HashMap;

/// All event boards, keyed by (tournament, event). Shared behind a lock by the web server;
/// each request does its read-modify-write under that lock (last write wins).
#[derive(Debug, Default)]
pub struct FixtureStore {
    boards: HashMap<EventKey, EventBoard>,
    /// Configuration for boards created from now on.
    default_config: MatchConfig,
}

impl FixtureStore {
    pub fn new(default_config: MatchConfig) -> Self {
        Self {
            boards: HashMap::new(),
            default_config,
        }
    }

    pub fn board(&self, key: &EventKey) -> Option<&EventBoard> {
        self.boards.get(key)
    }

    pub fn board_mut(&mut self, key: &EventKey) -> Option<&mut EventBoard> {
        self.boards.get_mut(key)
    }

    /// Board for the event, created empty on first use.
    pub fn board_or_create(&mut self, key: EventKey) -> &mut EventBoard {
        let default_config = self.default_config;
        self.boards.entry(key).or_insert_with(|| {
            log::info!(
                "Opened board for tournament {} event {}",
                key.tournament_id,
                key.event_id
            );
            EventBoard::new(key, default_config)
        })
    }

    /// Board and bracket position of a persisted fixture.
    pub fn locate(&self, id: FixtureId) -> Option<(EventKey, MatchKey)> {
        self.boards
            .iter()
            .find_map(|(event, board)| board.bracket.find(id).map(|m| (*event, m)))
    }
}
