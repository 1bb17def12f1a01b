//! Set and match scoring: win conditions, score entry, manual winners.

use crate::logic::propagation::propagate_winner;
use crate::models::{
    Bracket, FixtureError, FixtureId, MatchConfig, MatchKey, MatchStatus, SetScore, Side,
};
use serde::{Deserialize, Serialize};

/// Raw scores of one set, as entered by an organizer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetInput {
    pub team_a_score: u32,
    pub team_b_score: u32,
}

/// Winner of a set, or None while it is in progress.
///
/// With deuce enabled, reaching the deciding point wins outright (side A checked first).
/// Otherwise a side needs at least `points_to_win` and a lead of 2.
pub fn evaluate_set(team_a: u32, team_b: u32, config: &MatchConfig) -> Option<Side> {
    if config.deuce && config.deciding_point > 0 {
        if team_a == config.deciding_point {
            return Some(Side::A);
        }
        if team_b == config.deciding_point {
            return Some(Side::B);
        }
    }
    if team_a >= config.points_to_win && team_a >= team_b + 2 {
        return Some(Side::A);
    }
    if team_b >= config.points_to_win && team_b >= team_a + 2 {
        return Some(Side::B);
    }
    None
}

/// Completed sets won by (side A, side B).
pub fn sets_won(sets: &[SetScore]) -> (u32, u32) {
    sets.iter()
        .filter(|s| s.completed)
        .fold((0, 0), |(a, b), s| match s.winner {
            Some(Side::A) => (a + 1, b),
            Some(Side::B) => (a, b + 1),
            None => (a, b),
        })
}

/// Match winner: the first side to ceil(max_sets / 2) completed set wins.
pub fn evaluate_match(sets: &[SetScore], config: &MatchConfig) -> Option<Side> {
    let needed = config.sets_to_win();
    match sets_won(sets) {
        (a, _) if a >= needed => Some(Side::A),
        (_, b) if b >= needed => Some(Side::B),
        _ => None,
    }
}

fn refresh_set(set: &mut SetScore, config: &MatchConfig) {
    let winner = evaluate_set(set.team_a_score, set.team_b_score, config);
    set.completed = winner.is_some();
    set.winner = winner;
}

/// Resize to exactly `max_sets` sets, numbering new ones.
fn fit_sets(sets: &mut Vec<SetScore>, max_sets: u32) {
    sets.truncate(max_sets as usize);
    while sets.len() < max_sets as usize {
        sets.push(SetScore::new(sets.len() as u32 + 1));
    }
}

/// Re-evaluate every set and the match result of `key`; propagate if the winner changed.
pub fn settle(bracket: &mut Bracket, key: MatchKey) -> Result<MatchStatus, FixtureError> {
    let fixture = bracket.require_mut(key)?;
    let before = fixture.winner;
    let config = fixture.config;
    for set in fixture.sets.iter_mut() {
        refresh_set(set, &config);
    }
    match evaluate_match(&fixture.sets, &config) {
        Some(side) => {
            fixture.winner = fixture.participant(side);
            fixture.status = MatchStatus::Completed;
        }
        None => {
            fixture.winner = None;
            fixture.status = if fixture.sets.iter().any(SetScore::has_points) {
                MatchStatus::Ongoing
            } else {
                MatchStatus::Scheduled
            };
        }
    }
    fixture.touch();
    let status = fixture.status;
    if before != fixture.winner {
        propagate_winner(bracket, key)?;
    }
    Ok(status)
}

fn require_scorable(bracket: &Bracket, key: MatchKey) -> Result<u32, FixtureError> {
    let fixture = bracket.require(key)?;
    if !fixture.has_both_participants() {
        return Err(FixtureError::ParticipantsUndecided);
    }
    Ok(fixture.config.max_sets)
}

/// Enter one side's score for a set (0-based `set_index`). Promotes a draft fixture.
pub fn set_score(
    bracket: &mut Bracket,
    key: MatchKey,
    set_index: usize,
    side: Side,
    score: u32,
) -> Result<FixtureId, FixtureError> {
    let max_sets = require_scorable(bracket, key)?;
    if set_index >= max_sets as usize {
        return Err(FixtureError::SetOutOfRange { set_index, max_sets });
    }
    let id = bracket.promote(key)?;
    let fixture = bracket.require_mut(key)?;
    fit_sets(&mut fixture.sets, max_sets);
    fixture.sets[set_index].set_score(side, score);
    settle(bracket, key)?;
    Ok(id)
}

/// Replace all set scores at once. Promotes a draft fixture.
pub fn replace_sets(
    bracket: &mut Bracket,
    key: MatchKey,
    scores: &[SetInput],
) -> Result<FixtureId, FixtureError> {
    let max_sets = require_scorable(bracket, key)?;
    if scores.len() > max_sets as usize {
        return Err(FixtureError::SetOutOfRange {
            set_index: scores.len() - 1,
            max_sets,
        });
    }
    let id = bracket.promote(key)?;
    let fixture = bracket.require_mut(key)?;
    fixture.sets = scores
        .iter()
        .enumerate()
        .map(|(i, s)| SetScore {
            team_a_score: s.team_a_score,
            team_b_score: s.team_b_score,
            ..SetScore::new(i as u32 + 1)
        })
        .collect();
    fit_sets(&mut fixture.sets, max_sets);
    settle(bracket, key)?;
    Ok(id)
}

/// Declare `side` the winner without scores. Both participants must be known (byes are
/// resolved by the bracket, not by hand). Promotes a draft fixture.
pub fn set_winner(bracket: &mut Bracket, key: MatchKey, side: Side) -> Result<FixtureId, FixtureError> {
    require_scorable(bracket, key)?;
    let winner = bracket
        .require(key)?
        .participant(side)
        .ok_or(FixtureError::ParticipantsUndecided)?;
    let id = bracket.promote(key)?;
    let fixture = bracket.require_mut(key)?;
    fixture.winner = Some(winner);
    fixture.status = MatchStatus::Completed;
    fixture.touch();
    propagate_winner(bracket, key)?;
    Ok(id)
}
