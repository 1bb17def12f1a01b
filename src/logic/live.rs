//! Live scoring view: the round currently being played.

use crate::logic::bracket::is_void;
use crate::models::{Bracket, EventBoard, MatchStatus, RoundView};

/// Lowest round with a fixture that is unfinished and can still be played.
pub fn active_round(bracket: &Bracket) -> Option<u32> {
    bracket
        .iter()
        .filter(|(key, slot)| {
            slot.fixture().status != MatchStatus::Completed && !is_void(bracket, **key)
        })
        .map(|(key, _)| key.round)
        .min()
}

/// Fixtures of the active round, or None when the bracket is finished or absent.
pub fn live_round(board: &EventBoard) -> Option<RoundView> {
    active_round(&board.bracket).map(|round| board.round_view(round))
}
