//! Tournament fixtures web app: library with models, bracket logic, store and REST API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use logic::{
    active_round, apply_config_to_all, auto_advance_byes, build_bracket, clear_result,
    create_fixture, delete_fixtures, evaluate_match, evaluate_set, generate_fixtures, live_round,
    parse_participants_csv, propagate_winner, replace_sets, resolve_bye, round_count,
    schedule_round, set_score, set_winner, update_match_config, SetInput,
};
pub use models::{
    round_name, Bracket, EventBoard, EventId, EventKey, Fixture, FixtureError, FixtureId,
    FixtureSlot, MatchConfig, MatchKey, MatchStatus, Participant, ParticipantId, ParticipantInput,
    SetScore, Side, TournamentId,
};
pub use store::FixtureStore;
