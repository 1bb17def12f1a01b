//! Fixture generation and bulk fixture lifecycle for an event board.

use crate::logic::bracket::build_bracket;
use crate::models::{EventBoard, FixtureError, FixtureId, MatchConfig, MatchKey, ParticipantId};
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Check an organizer-chosen seed order: every registered participant exactly once.
pub fn validate_seed_order(
    board: &EventBoard,
    order: &[ParticipantId],
) -> Result<Vec<ParticipantId>, FixtureError> {
    if order.len() != board.participants.len() {
        return Err(FixtureError::SeedOrderLength {
            expected: board.participants.len(),
            got: order.len(),
        });
    }
    let mut seen = HashSet::with_capacity(order.len());
    for &id in order {
        if board.participant(id).is_none() {
            return Err(FixtureError::ParticipantNotFound(id));
        }
        if !seen.insert(id) {
            return Err(FixtureError::DuplicateSeed(id));
        }
    }
    Ok(order.to_vec())
}

/// Registered participants in random order.
pub fn random_seed_order(board: &EventBoard) -> Vec<ParticipantId> {
    let mut ids: Vec<_> = board.participants.iter().map(|p| p.id).collect();
    ids.shuffle(&mut rand::thread_rng());
    ids
}

/// Generate the knockout bracket for the board.
///
/// Uses `seed_order` when given, otherwise a random order. `config` applies to every
/// fixture (defaults to the board's). Refused while fixtures already exist.
pub fn generate_fixtures(
    board: &mut EventBoard,
    seed_order: Option<&[ParticipantId]>,
    config: Option<MatchConfig>,
) -> Result<(), FixtureError> {
    if !board.bracket.is_empty() {
        return Err(FixtureError::BracketExists);
    }
    if board.participants.len() < 2 {
        return Err(FixtureError::NotEnoughParticipants);
    }
    let config = config.unwrap_or(board.default_config);
    config.validate()?;
    let seeds = match seed_order {
        Some(order) => validate_seed_order(board, order)?,
        None => random_seed_order(board),
    };
    board.bracket = build_bracket(&seeds, &config)?;
    log::info!(
        "Generated {} fixtures over {} rounds for event {} ({} participants, {})",
        board.bracket.len(),
        board.bracket.total_rounds(),
        board.event_id,
        seeds.len(),
        if seed_order.is_some() { "seeded" } else { "random order" }
    );
    Ok(())
}

/// Delete every fixture of the event. Returns the number of persisted fixtures removed.
pub fn delete_fixtures(board: &mut EventBoard) -> usize {
    let removed = board.bracket.clear();
    log::info!("Deleted {} fixtures for event {}", removed, board.event_id);
    removed
}

/// Create the stored fixture for a draft slot.
pub fn create_fixture(board: &mut EventBoard, key: MatchKey) -> Result<FixtureId, FixtureError> {
    if board.bracket.is_empty() {
        return Err(FixtureError::NoBracket);
    }
    let slot = board.bracket.slot(key).ok_or(FixtureError::MatchNotFound {
        round: key.round,
        match_index: key.match_index,
    })?;
    if !slot.is_draft() {
        return Err(FixtureError::AlreadyPersisted {
            round: key.round,
            match_index: key.match_index,
        });
    }
    let id = board.bracket.promote(key)?;
    if let Some(fixture) = board.bracket.fixture_mut(key) {
        fixture.touch();
    }
    Ok(id)
}
