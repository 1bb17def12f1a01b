//! Bracket: fixture slots keyed by (round, match index).

use crate::models::board::FixtureError;
use crate::models::fixture::{Fixture, FixtureId, MatchKey};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A bracket position: either a stored fixture with an id, or a draft that has
/// not been written by a user yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FixtureSlot {
    Persisted { id: FixtureId, fixture: Fixture },
    Draft(Fixture),
}

impl FixtureSlot {
    pub fn persisted(fixture: Fixture) -> Self {
        FixtureSlot::Persisted {
            id: Uuid::new_v4(),
            fixture,
        }
    }

    pub fn id(&self) -> Option<FixtureId> {
        match self {
            FixtureSlot::Persisted { id, .. } => Some(*id),
            FixtureSlot::Draft(_) => None,
        }
    }

    pub fn fixture(&self) -> &Fixture {
        match self {
            FixtureSlot::Persisted { fixture, .. } | FixtureSlot::Draft(fixture) => fixture,
        }
    }

    pub fn fixture_mut(&mut self) -> &mut Fixture {
        match self {
            FixtureSlot::Persisted { fixture, .. } | FixtureSlot::Draft(fixture) => fixture,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, FixtureSlot::Draft(_))
    }
}

/// Single-elimination tree. Round 0 holds `size / 2` matches, each later round half as many.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bracket {
    rounds: u32,
    slots: BTreeMap<MatchKey, FixtureSlot>,
}

impl Bracket {
    pub fn new(rounds: u32, slots: BTreeMap<MatchKey, FixtureSlot>) -> Self {
        Self { rounds, slots }
    }

    pub fn total_rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Number of matches in a round (0 when out of range).
    pub fn matches_in_round(&self, round: u32) -> u32 {
        if round >= self.rounds {
            return 0;
        }
        1 << (self.rounds - round - 1)
    }

    pub fn is_final(&self, key: MatchKey) -> bool {
        self.rounds > 0 && key.round == self.rounds - 1
    }

    pub fn final_key(&self) -> Option<MatchKey> {
        self.rounds.checked_sub(1).map(|r| MatchKey::new(r, 0))
    }

    pub fn slot(&self, key: MatchKey) -> Option<&FixtureSlot> {
        self.slots.get(&key)
    }

    pub fn fixture(&self, key: MatchKey) -> Option<&Fixture> {
        self.slots.get(&key).map(FixtureSlot::fixture)
    }

    /// Mutable access without promotion; used for derived writes (propagation, byes).
    pub fn fixture_mut(&mut self, key: MatchKey) -> Option<&mut Fixture> {
        self.slots.get_mut(&key).map(FixtureSlot::fixture_mut)
    }

    /// Fixture at `key` or a `MatchNotFound` error.
    pub fn require(&self, key: MatchKey) -> Result<&Fixture, FixtureError> {
        self.fixture(key).ok_or(FixtureError::MatchNotFound {
            round: key.round,
            match_index: key.match_index,
        })
    }

    pub fn require_mut(&mut self, key: MatchKey) -> Result<&mut Fixture, FixtureError> {
        self.fixture_mut(key).ok_or(FixtureError::MatchNotFound {
            round: key.round,
            match_index: key.match_index,
        })
    }

    /// Turn a draft into a persisted fixture on its first user write. Returns the id
    /// (the existing one when already persisted).
    pub fn promote(&mut self, key: MatchKey) -> Result<FixtureId, FixtureError> {
        let slot = self.slots.get_mut(&key).ok_or(FixtureError::MatchNotFound {
            round: key.round,
            match_index: key.match_index,
        })?;
        if let FixtureSlot::Draft(fixture) = slot {
            let promoted = FixtureSlot::persisted(fixture.clone());
            log::debug!(
                "Promoted draft fixture round {} match {} to {:?}",
                key.round,
                key.match_index,
                promoted.id()
            );
            *slot = promoted;
        }
        slot.id().ok_or(FixtureError::MatchNotFound {
            round: key.round,
            match_index: key.match_index,
        })
    }

    /// Bracket position of a persisted fixture.
    pub fn find(&self, id: FixtureId) -> Option<MatchKey> {
        self.slots
            .iter()
            .find(|(_, slot)| slot.id() == Some(id))
            .map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MatchKey, &FixtureSlot)> {
        self.slots.iter()
    }

    /// Keys of one round, in match index order.
    pub fn round_keys(&self, round: u32) -> Vec<MatchKey> {
        (0..self.matches_in_round(round))
            .map(|i| MatchKey::new(round, i))
            .filter(|k| self.slots.contains_key(k))
            .collect()
    }

    pub fn keys(&self) -> Vec<MatchKey> {
        self.slots.keys().copied().collect()
    }

    /// Drop every slot. Returns how many persisted fixtures were removed.
    pub fn clear(&mut self) -> usize {
        let persisted = self.slots.values().filter(|s| !s.is_draft()).count();
        self.slots.clear();
        self.rounds = 0;
        persisted
    }
}

/// Round name from its distance to the final.
pub fn round_name(round: u32, total_rounds: u32) -> String {
    match total_rounds.saturating_sub(1).saturating_sub(round) {
        0 => "Final".to_string(),
        1 => "Semi-Final".to_string(),
        2 => "Quarter-Final".to_string(),
        3 => "Round of 16".to_string(),
        _ => format!("Round {}", round + 1),
    }
}
