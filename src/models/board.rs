//! EventBoard: participants and bracket of one tournament event.

use crate::models::bracket::{round_name, Bracket};
use crate::models::fixture::{Fixture, FixtureId, MatchConfig, MatchKey};
use crate::models::participant::{Participant, ParticipantId, ParticipantInput};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during fixture and bracket operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FixtureError {
    /// Need at least 2 participants to build a bracket.
    #[error("Need at least 2 participants to generate fixtures")]
    NotEnoughParticipants,
    /// Fixtures already exist for this event; delete them first.
    #[error("Fixtures already exist for this event")]
    BracketExists,
    /// No fixtures have been generated for this event.
    #[error("No fixtures generated for this event")]
    NoBracket,
    #[error("Seed order must list all {expected} participants (got {got})")]
    SeedOrderLength { expected: usize, got: usize },
    #[error("Participant {0} appears more than once in the seed order")]
    DuplicateSeed(ParticipantId),
    #[error("Participant not found")]
    ParticipantNotFound(ParticipantId),
    /// Names are unique per event (case-insensitive).
    #[error("A participant with this name already exists")]
    DuplicateParticipantName,
    #[error("Participant name cannot be empty")]
    EmptyName,
    #[error("No match at round {round}, index {match_index}")]
    MatchNotFound { round: u32, match_index: u32 },
    #[error("Fixture not found")]
    FixtureNotFound(FixtureId),
    /// Creating a fixture for a slot that already has one.
    #[error("Fixture already exists for round {round}, index {match_index}")]
    AlreadyPersisted { round: u32, match_index: u32 },
    /// Scores or a winner need both participants to be known.
    #[error("Both participants must be decided before scoring")]
    ParticipantsUndecided,
    #[error("Set {set_index} is out of range (match has {max_sets} sets)")]
    SetOutOfRange { set_index: usize, max_sets: u32 },
    #[error("Invalid match config: {0}")]
    InvalidConfig(String),
    #[error("Invalid CSV on line {line}: {message}")]
    Csv { line: u64, message: String },
}

/// Unique identifier for a tournament (owned by an external collaborator).
pub type TournamentId = Uuid;

/// Unique identifier for an event within a tournament.
pub type EventId = Uuid;

/// Store key of a board.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct EventKey {
    pub tournament_id: TournamentId,
    pub event_id: EventId,
}

impl EventKey {
    pub fn new(tournament_id: TournamentId, event_id: EventId) -> Self {
        Self {
            tournament_id,
            event_id,
        }
    }
}

/// API view of one fixture slot, with participant names resolved.
#[derive(Clone, Debug, Serialize)]
pub struct FixtureView {
    /// None for drafts.
    pub id: Option<FixtureId>,
    pub draft: bool,
    pub tournament_id: TournamentId,
    pub event_id: EventId,
    #[serde(flatten)]
    pub fixture: Fixture,
    pub team_a_name: Option<String>,
    pub team_b_name: Option<String>,
    pub winner_name: Option<String>,
}

/// Fixtures of one round, in match index order.
#[derive(Clone, Debug, Serialize)]
pub struct RoundView {
    pub round: u32,
    pub name: String,
    pub matches: Vec<FixtureView>,
}

/// Whole bracket for display.
#[derive(Clone, Debug, Serialize)]
pub struct BracketView {
    pub tournament_id: TournamentId,
    pub event_id: EventId,
    pub total_rounds: u32,
    pub rounds: Vec<RoundView>,
    pub champion: Option<ParticipantId>,
    pub champion_name: Option<String>,
}

/// Participants and fixtures of a tournament event.
#[derive(Clone, Debug)]
pub struct EventBoard {
    pub tournament_id: TournamentId,
    pub event_id: EventId,
    pub participants: Vec<Participant>,
    pub bracket: Bracket,
    /// Applied to newly generated fixtures.
    pub default_config: MatchConfig,
}

impl EventBoard {
    /// Create an empty board with no participants or fixtures.
    pub fn new(key: EventKey, default_config: MatchConfig) -> Self {
        Self {
            tournament_id: key.tournament_id,
            event_id: key.event_id,
            participants: Vec::new(),
            bracket: Bracket::default(),
            default_config,
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    fn name_taken(&self, name: &str, except: Option<ParticipantId>) -> bool {
        self.participants
            .iter()
            .any(|p| Some(p.id) != except && p.name.eq_ignore_ascii_case(name))
    }

    /// Register a participant. Names must be non-empty and unique (case-insensitive).
    pub fn add_participant(&mut self, input: &ParticipantInput) -> Result<&Participant, FixtureError> {
        let input = input.normalized();
        if input.name.is_empty() {
            return Err(FixtureError::EmptyName);
        }
        if self.name_taken(&input.name, None) {
            return Err(FixtureError::DuplicateParticipantName);
        }
        let mut participant = Participant::new(input.name);
        participant.partner = input.partner;
        participant.group = input.group;
        self.participants.push(participant);
        let added = self.participants.len() - 1;
        Ok(&self.participants[added])
    }

    /// Validate every input first, then register them all (nothing is added on error).
    pub fn add_participants(&mut self, inputs: &[ParticipantInput]) -> Result<usize, FixtureError> {
        let mut staged = self.clone();
        for input in inputs {
            staged.add_participant(input)?;
        }
        self.participants = staged.participants;
        Ok(inputs.len())
    }

    pub fn update_participant(
        &mut self,
        id: ParticipantId,
        input: &ParticipantInput,
    ) -> Result<&Participant, FixtureError> {
        let input = input.normalized();
        if input.name.is_empty() {
            return Err(FixtureError::EmptyName);
        }
        if self.name_taken(&input.name, Some(id)) {
            return Err(FixtureError::DuplicateParticipantName);
        }
        let p = self
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(FixtureError::ParticipantNotFound(id))?;
        p.name = input.name;
        p.partner = input.partner;
        p.group = input.group;
        Ok(&*p)
    }

    /// Remove a participant. A bracket that references them no longer matches the
    /// registered field, so it is cleared. Returns the number of persisted fixtures removed.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<usize, FixtureError> {
        let idx = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(FixtureError::ParticipantNotFound(id))?;
        self.participants.remove(idx);
        let referenced = self
            .bracket
            .iter()
            .any(|(_, slot)| slot.fixture().involves(id));
        if !referenced {
            return Ok(0);
        }
        let removed = self.bracket.clear();
        log::warn!(
            "Participant {} removed from event {}; cleared bracket ({} fixtures)",
            id,
            self.event_id,
            removed
        );
        Ok(removed)
    }

    pub fn display_name(&self, id: Option<ParticipantId>) -> Option<String> {
        id.and_then(|id| self.participant(id)).map(Participant::display_name)
    }

    pub fn fixture_view(&self, key: MatchKey) -> Option<FixtureView> {
        let slot = self.bracket.slot(key)?;
        let fixture = slot.fixture().clone();
        Some(FixtureView {
            id: slot.id(),
            draft: slot.is_draft(),
            tournament_id: self.tournament_id,
            event_id: self.event_id,
            team_a_name: self.display_name(fixture.team_a),
            team_b_name: self.display_name(fixture.team_b),
            winner_name: self.display_name(fixture.winner),
            fixture,
        })
    }

    /// All fixture slots ordered by round, then match index.
    pub fn fixtures(&self) -> Vec<FixtureView> {
        self.bracket
            .keys()
            .into_iter()
            .filter_map(|k| self.fixture_view(k))
            .collect()
    }

    pub fn round_view(&self, round: u32) -> RoundView {
        RoundView {
            round,
            name: round_name(round, self.bracket.total_rounds()),
            matches: self
                .bracket
                .round_keys(round)
                .into_iter()
                .filter_map(|k| self.fixture_view(k))
                .collect(),
        }
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<ParticipantId> {
        self.bracket
            .final_key()
            .and_then(|k| self.bracket.fixture(k))
            .and_then(|f| f.winner)
    }

    pub fn bracket_view(&self) -> BracketView {
        let champion = self.champion();
        BracketView {
            tournament_id: self.tournament_id,
            event_id: self.event_id,
            total_rounds: self.bracket.total_rounds(),
            rounds: (0..self.bracket.total_rounds())
                .map(|r| self.round_view(r))
                .collect(),
            champion,
            champion_name: self.display_name(champion),
        }
    }
}
