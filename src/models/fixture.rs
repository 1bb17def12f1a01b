//! Fixture (match), Set, Side and per-match configuration.

use crate::models::board::FixtureError;
use crate::models::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a persisted fixture.
pub type FixtureId = Uuid;

/// One of the two sides of a fixture.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "team_a")]
    A,
    #[serde(rename = "team_b")]
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Aggregate status of a fixture.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Ongoing,
    Completed,
}

/// Scoring rules for a fixture.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Best-of-N sets.
    pub max_sets: u32,
    pub points_to_win: u32,
    /// Enables the deciding point hard cap.
    pub deuce: bool,
    pub deciding_point: u32,
    pub court_number: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_sets: 3,
            points_to_win: 30,
            deuce: true,
            deciding_point: 50,
            court_number: 1,
        }
    }
}

/// Highest number of sets a match may be configured with.
pub const MAX_SETS_LIMIT: u32 = 15;

impl MatchConfig {
    /// Sets a side needs to win the match: ceil(max_sets / 2).
    pub fn sets_to_win(&self) -> u32 {
        self.max_sets.div_ceil(2)
    }

    pub fn validate(&self) -> Result<(), FixtureError> {
        if self.max_sets == 0 || self.max_sets > MAX_SETS_LIMIT {
            return Err(FixtureError::InvalidConfig(format!(
                "max sets must be between 1 and {MAX_SETS_LIMIT}"
            )));
        }
        if self.points_to_win == 0 {
            return Err(FixtureError::InvalidConfig(
                "points to win must be at least 1".to_string(),
            ));
        }
        if self.deuce && self.deciding_point < self.points_to_win {
            return Err(FixtureError::InvalidConfig(
                "deciding point cannot be lower than points to win".to_string(),
            ));
        }
        if self.court_number == 0 {
            return Err(FixtureError::InvalidConfig(
                "court number must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A single set: scores for both sides and its outcome.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    /// 1-based.
    pub set_number: u32,
    pub team_a_score: u32,
    pub team_b_score: u32,
    pub completed: bool,
    pub winner: Option<Side>,
}

impl SetScore {
    pub fn new(set_number: u32) -> Self {
        Self {
            set_number,
            team_a_score: 0,
            team_b_score: 0,
            completed: false,
            winner: None,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::A => self.team_a_score,
            Side::B => self.team_b_score,
        }
    }

    pub fn set_score(&mut self, side: Side, score: u32) {
        match side {
            Side::A => self.team_a_score = score,
            Side::B => self.team_b_score = score,
        }
    }

    pub fn has_points(&self) -> bool {
        self.team_a_score > 0 || self.team_b_score > 0
    }
}

/// Position of a fixture in the bracket.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct MatchKey {
    pub round: u32,
    pub match_index: u32,
}

impl MatchKey {
    pub fn new(round: u32, match_index: u32) -> Self {
        Self { round, match_index }
    }

    /// Slot this match's winner feeds: next round, index / 2, A when the index is even.
    pub fn next(&self) -> (MatchKey, Side) {
        let side = if self.match_index % 2 == 0 { Side::A } else { Side::B };
        (MatchKey::new(self.round + 1, self.match_index / 2), side)
    }

    /// Match in the previous round that feeds `side` of this one. None in round 0.
    pub fn feeder(&self, side: Side) -> Option<MatchKey> {
        if self.round == 0 {
            return None;
        }
        let offset = match side {
            Side::A => 0,
            Side::B => 1,
        };
        Some(MatchKey::new(self.round - 1, self.match_index * 2 + offset))
    }
}

/// Fixture data, with or without a persisted id (see [`crate::models::FixtureSlot`]).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub round: u32,
    pub match_index: u32,
    /// None while undecided (TBD) or for a bye.
    pub team_a: Option<ParticipantId>,
    pub team_b: Option<ParticipantId>,
    pub sets: Vec<SetScore>,
    pub status: MatchStatus,
    pub winner: Option<ParticipantId>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub config: MatchConfig,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Fixture {
    pub fn new(
        key: MatchKey,
        team_a: Option<ParticipantId>,
        team_b: Option<ParticipantId>,
        config: MatchConfig,
    ) -> Self {
        Self {
            round: key.round,
            match_index: key.match_index,
            team_a,
            team_b,
            sets: Vec::new(),
            status: MatchStatus::Scheduled,
            winner: None,
            scheduled_at: None,
            config,
            updated_at: None,
        }
    }

    pub fn key(&self) -> MatchKey {
        MatchKey::new(self.round, self.match_index)
    }

    pub fn participant(&self, side: Side) -> Option<ParticipantId> {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    pub fn set_participant(&mut self, side: Side, participant: Option<ParticipantId>) {
        match side {
            Side::A => self.team_a = participant,
            Side::B => self.team_b = participant,
        }
    }

    /// Which side a participant plays on, if any.
    pub fn side_of(&self, participant: ParticipantId) -> Option<Side> {
        if self.team_a == Some(participant) {
            Some(Side::A)
        } else if self.team_b == Some(participant) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.side_of(participant).is_some()
    }

    pub fn has_both_participants(&self) -> bool {
        self.team_a.is_some() && self.team_b.is_some()
    }

    pub fn has_result(&self) -> bool {
        self.winner.is_some() || self.status != MatchStatus::Scheduled
    }

    /// Clear sets, winner and status.
    pub fn reset_result(&mut self) {
        self.sets.clear();
        self.winner = None;
        self.status = MatchStatus::Scheduled;
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
