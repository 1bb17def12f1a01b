//! Bracket builder: seed padding, round shape, and bye resolution.

use crate::logic::propagation::propagate_winner;
use crate::models::{
    Bracket, Fixture, FixtureError, FixtureSlot, MatchConfig, MatchKey, MatchStatus,
    ParticipantId, Side,
};
use std::collections::BTreeMap;

/// Bracket size for `participants` entrants: the next power of two, or 0 when fewer than 2.
pub fn bracket_size(participants: usize) -> usize {
    if participants < 2 {
        return 0;
    }
    participants.next_power_of_two()
}

/// Number of rounds: ceil(log2(participants)), 0 when fewer than 2.
pub fn round_count(participants: usize) -> u32 {
    match bracket_size(participants) {
        0 => 0,
        size => size.trailing_zeros(),
    }
}

/// Seed order padded with byes (None) up to the bracket size.
pub fn pad_seeds(seeds: &[ParticipantId]) -> Vec<Option<ParticipantId>> {
    let mut padded: Vec<_> = seeds.iter().copied().map(Some).collect();
    padded.resize(bracket_size(seeds.len()), None);
    padded
}

/// Build a single-elimination bracket from the seed order.
///
/// Round 0 pairs consecutive seed slots (0v1, 2v3, ...) and is persisted right away;
/// later rounds start as TBD drafts. Byes are resolved before returning.
/// Fewer than 2 seeds give an empty bracket.
pub fn build_bracket(seeds: &[ParticipantId], config: &MatchConfig) -> Result<Bracket, FixtureError> {
    let rounds = round_count(seeds.len());
    if rounds == 0 {
        return Ok(Bracket::default());
    }
    let padded = pad_seeds(seeds);
    let mut slots = BTreeMap::new();
    for (i, pair) in padded.chunks_exact(2).enumerate() {
        let key = MatchKey::new(0, i as u32);
        slots.insert(
            key,
            FixtureSlot::persisted(Fixture::new(key, pair[0], pair[1], *config)),
        );
    }
    let mut matches = padded.len() / 4;
    for round in 1..rounds {
        for i in 0..matches {
            let key = MatchKey::new(round, i as u32);
            slots.insert(key, FixtureSlot::Draft(Fixture::new(key, None, None, *config)));
        }
        matches /= 2;
    }
    let mut bracket = Bracket::new(rounds, slots);
    auto_advance_byes(&mut bracket)?;
    Ok(bracket)
}

/// True when `side` of the match at `key` can never receive a participant: an empty
/// seed in round 0, or a feeder match that is itself void.
pub fn is_slot_dead(bracket: &Bracket, key: MatchKey, side: Side) -> bool {
    let Some(fixture) = bracket.fixture(key) else {
        return true;
    };
    if fixture.participant(side).is_some() {
        return false;
    }
    match key.feeder(side) {
        None => true,
        Some(feeder) => is_void(bracket, feeder),
    }
}

/// A match neither of whose slots can ever be filled.
pub fn is_void(bracket: &Bracket, key: MatchKey) -> bool {
    is_slot_dead(bracket, key, Side::A) && is_slot_dead(bracket, key, Side::B)
}

/// Present side of a bye: exactly one participant, the other slot dead.
pub fn bye_side(bracket: &Bracket, key: MatchKey) -> Option<(Side, ParticipantId)> {
    let fixture = bracket.fixture(key)?;
    let (side, participant) = match (fixture.team_a, fixture.team_b) {
        (Some(a), None) => (Side::A, a),
        (None, Some(b)) => (Side::B, b),
        _ => return None,
    };
    is_slot_dead(bracket, key, side.other()).then_some((side, participant))
}

/// Auto-advance the present side of a bye without scores. Returns whether the match was resolved.
pub fn resolve_bye(bracket: &mut Bracket, key: MatchKey) -> Result<bool, FixtureError> {
    if bracket.require(key)?.status == MatchStatus::Completed {
        return Ok(false);
    }
    let Some((_, participant)) = bye_side(bracket, key) else {
        return Ok(false);
    };
    let fixture = bracket.require_mut(key)?;
    fixture.sets.clear();
    fixture.winner = Some(participant);
    fixture.status = MatchStatus::Completed;
    fixture.touch();
    log::debug!(
        "Bye at round {} match {}: {} advances",
        key.round,
        key.match_index,
        participant
    );
    propagate_winner(bracket, key)?;
    Ok(true)
}

/// Resolve every pending bye, round by round. Returns how many previously open matches
/// were settled as byes, including those that became byes through propagation.
pub fn auto_advance_byes(bracket: &mut Bracket) -> Result<usize, FixtureError> {
    let open: Vec<MatchKey> = bracket
        .iter()
        .filter(|(_, s)| s.fixture().status != MatchStatus::Completed)
        .map(|(key, _)| *key)
        .collect();
    for key in bracket.keys() {
        resolve_bye(bracket, key)?;
    }
    Ok(open
        .iter()
        .filter(|&&key| bracket.fixture(key).is_some_and(|f| f.status == MatchStatus::Completed))
        .count())
}
