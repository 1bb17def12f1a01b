//! Winner propagation through the single-elimination tree.

use crate::logic::bracket::resolve_bye;
use crate::models::{Bracket, FixtureError, MatchKey};

/// Write the current winner of `key` (or its absence) into the next round's slot.
///
/// If the slot held someone else and the next match already had a result, that result is
/// reset and the reset propagates further down. A new occupant that makes the next match a
/// bye advances immediately.
pub fn propagate_winner(bracket: &mut Bracket, key: MatchKey) -> Result<(), FixtureError> {
    let winner = bracket.require(key)?.winner;
    if bracket.is_final(key) {
        return Ok(());
    }
    let (next, side) = key.next();
    let next_fixture = bracket.require(next)?;
    if next_fixture.participant(side) == winner {
        return Ok(());
    }
    if next_fixture.has_result() {
        log::debug!(
            "Round {} match {} changed; resetting derived result of round {} match {}",
            key.round,
            key.match_index,
            next.round,
            next.match_index
        );
        bracket.require_mut(next)?.reset_result();
        propagate_winner(bracket, next)?;
    }
    let next_fixture = bracket.require_mut(next)?;
    next_fixture.set_participant(side, winner);
    next_fixture.touch();
    if winner.is_some() {
        resolve_bye(bracket, next)?;
    }
    Ok(())
}

/// Undo the result of `key`: clear its sets, winner and status, then clear every
/// downstream slot and result derived from it.
pub fn clear_result(bracket: &mut Bracket, key: MatchKey) -> Result<(), FixtureError> {
    let fixture = bracket.require_mut(key)?;
    fixture.reset_result();
    fixture.touch();
    propagate_winner(bracket, key)
}
