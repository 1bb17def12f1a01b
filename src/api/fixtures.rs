//! Single-fixture endpoints addressed by fixture id.

use super::{board, board_mut, parse_id, read_store, write_store, ApiError, AppState, EventPath};
use crate::logic::{
    clear_result, create_fixture, replace_sets, schedule_match, set_winner, update_match_config,
    SetInput,
};
use crate::models::{Bracket, EventKey, FixtureError, FixtureId, MatchConfig, MatchKey, Side};
use crate::store::FixtureStore;
use actix_web::{
    delete, get, post, put,
    web::{self, Json, Path},
    HttpResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Fields a fixture update may carry; absent fields are left unchanged.
#[derive(Deserialize, Default)]
struct FixtureUpdate {
    #[serde(default)]
    config: Option<MatchConfig>,
    #[serde(default)]
    sets: Option<Vec<SetInput>>,
    #[serde(default)]
    winner: Option<Side>,
    #[serde(default)]
    scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct CreateFixtureBody {
    tournament_id: String,
    event_id: String,
    round: u32,
    match_index: u32,
    #[serde(flatten)]
    update: FixtureUpdate,
}

/// Path segment: fixture id (e.g. /api/fixtures/{id})
#[derive(Deserialize)]
struct FixturePath {
    id: String,
}

/// Apply config, then sets, then winner, then schedule. All-or-nothing.
fn apply_update(bracket: &mut Bracket, key: MatchKey, update: &FixtureUpdate) -> Result<(), FixtureError> {
    let mut staged = bracket.clone();
    if let Some(config) = update.config {
        update_match_config(&mut staged, key, config)?;
    }
    if let Some(sets) = &update.sets {
        replace_sets(&mut staged, key, sets)?;
    }
    if let Some(side) = update.winner {
        set_winner(&mut staged, key, side)?;
    }
    if let Some(at) = update.scheduled_at {
        schedule_match(&mut staged, key, at)?;
    }
    *bracket = staged;
    Ok(())
}

fn locate(store: &FixtureStore, id: FixtureId) -> Result<(EventKey, MatchKey), ApiError> {
    store
        .locate(id)
        .ok_or(ApiError::Fixture(FixtureError::FixtureNotFound(id)))
}

/// Create the stored fixture for a draft bracket slot, optionally with initial data.
#[post("/api/fixtures")]
async fn api_create_fixture(
    state: AppState,
    body: Json<CreateFixtureBody>,
) -> Result<HttpResponse, ApiError> {
    let key = EventPath {
        tournament_id: body.tournament_id.clone(),
        event_id: body.event_id.clone(),
    }
    .key()?;
    let match_key = MatchKey::new(body.round, body.match_index);
    let mut store = write_store(&state)?;
    let board = board_mut(&mut store, &key)?;
    let before = board.bracket.clone();
    let id = create_fixture(board, match_key)?;
    if let Err(e) = apply_update(&mut board.bracket, match_key, &body.update) {
        board.bracket = before;
        return Err(e.into());
    }
    log::info!(
        "Created fixture {} at round {} match {} of event {}",
        id,
        match_key.round,
        match_key.match_index,
        key.event_id
    );
    Ok(HttpResponse::Created().json(board.fixture_view(match_key)))
}

#[get("/api/fixtures/{id}")]
async fn api_get_fixture(state: AppState, path: Path<FixturePath>) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path.id, "fixture id")?;
    let store = read_store(&state)?;
    let (event, match_key) = locate(&store, id)?;
    Ok(HttpResponse::Ok().json(board(&store, &event)?.fixture_view(match_key)))
}

/// Update scores, config, schedule and/or winner of a fixture.
#[put("/api/fixtures/{id}")]
async fn api_update_fixture(
    state: AppState,
    path: Path<FixturePath>,
    body: Json<FixtureUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path.id, "fixture id")?;
    let mut store = write_store(&state)?;
    let (event, match_key) = locate(&store, id)?;
    let board = board_mut(&mut store, &event)?;
    apply_update(&mut board.bracket, match_key, &body)?;
    Ok(HttpResponse::Ok().json(board.fixture_view(match_key)))
}

/// Undo a result; downstream results derived from it are cleared too.
#[delete("/api/fixtures/{id}/winner")]
async fn api_clear_winner(state: AppState, path: Path<FixturePath>) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path.id, "fixture id")?;
    let mut store = write_store(&state)?;
    let (event, match_key) = locate(&store, id)?;
    let board = board_mut(&mut store, &event)?;
    clear_result(&mut board.bracket, match_key)?;
    Ok(HttpResponse::Ok().json(board.fixture_view(match_key)))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_create_fixture)
        .service(api_get_fixture)
        .service(api_update_fixture)
        .service(api_clear_winner);
}
