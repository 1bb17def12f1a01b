//! Round scheduling and match configuration updates.

use crate::logic::scoring::settle;
use crate::models::{Bracket, EventBoard, FixtureError, FixtureId, MatchConfig, MatchKey, SetScore};
use chrono::{DateTime, Utc};

/// Set the start time of every match in `round`. Returns how many fixtures were scheduled.
pub fn schedule_round(
    bracket: &mut Bracket,
    round: u32,
    at: DateTime<Utc>,
) -> Result<usize, FixtureError> {
    let keys = bracket.round_keys(round);
    if keys.is_empty() {
        return Err(FixtureError::MatchNotFound {
            round,
            match_index: 0,
        });
    }
    for &key in &keys {
        bracket.promote(key)?;
        let fixture = bracket.require_mut(key)?;
        fixture.scheduled_at = Some(at);
        fixture.touch();
    }
    Ok(keys.len())
}

/// Schedule a single match.
pub fn schedule_match(
    bracket: &mut Bracket,
    key: MatchKey,
    at: DateTime<Utc>,
) -> Result<FixtureId, FixtureError> {
    let id = bracket.promote(key)?;
    let fixture = bracket.require_mut(key)?;
    fixture.scheduled_at = Some(at);
    fixture.touch();
    Ok(id)
}

/// Replace the configuration of one match. Sets beyond the new `max_sets` are dropped and
/// a scored match is re-evaluated under the new rules.
pub fn update_match_config(
    bracket: &mut Bracket,
    key: MatchKey,
    config: MatchConfig,
) -> Result<FixtureId, FixtureError> {
    config.validate()?;
    let id = bracket.promote(key)?;
    let fixture = bracket.require_mut(key)?;
    fixture.config = config;
    fixture.sets.truncate(config.max_sets as usize);
    fixture.touch();
    let rescore =
        fixture.has_both_participants() && fixture.sets.iter().any(SetScore::has_points);
    if rescore {
        settle(bracket, key)?;
    }
    Ok(id)
}

/// Apply one configuration to every fixture of the event and make it the board default.
pub fn apply_config_to_all(board: &mut EventBoard, config: MatchConfig) -> Result<usize, FixtureError> {
    config.validate()?;
    board.default_config = config;
    let keys = board.bracket.keys();
    for &key in &keys {
        update_match_config(&mut board.bracket, key, config)?;
    }
    log::info!(
        "Applied match config to {} fixtures of event {}",
        keys.len(),
        board.event_id
    );
    Ok(keys.len())
}
