//! Fixture business logic: bracket building, propagation, scoring, scheduling, etc.

mod bracket;
mod generation;
mod import;
mod live;
mod propagation;
mod schedule;
mod scoring;

pub use bracket::{
    auto_advance_byes, bracket_size, build_bracket, bye_side, is_slot_dead, is_void, pad_seeds,
    resolve_bye, round_count,
};
pub use generation::{
    create_fixture, delete_fixtures, generate_fixtures, random_seed_order, validate_seed_order,
};
pub use import::parse_participants_csv;
pub use live::{active_round, live_round};
pub use propagation::{clear_result, propagate_winner};
pub use schedule::{apply_config_to_all, schedule_match, schedule_round, update_match_config};
pub use scoring::{
    evaluate_match, evaluate_set, replace_sets, set_score, set_winner, sets_won, settle, SetInput,
};
