//! Data structures for tournament fixtures: participants, fixtures, brackets, event boards.

mod board;
mod bracket;
mod fixture;
mod participant;

pub use board::{
    BracketView, EventBoard, EventId, EventKey, FixtureError, FixtureView, RoundView, TournamentId,
};
pub use bracket::{round_name, Bracket, FixtureSlot};
pub use fixture::{
    Fixture, FixtureId, MatchConfig, MatchKey, MatchStatus, SetScore, Side, MAX_SETS_LIMIT,
};
pub use participant::{Participant, ParticipantId, ParticipantInput};
