//! Event-level endpoints: generation, bracket views, bulk scheduling and configuration.

use super::{board, board_mut, parse_id, read_store, write_store, ApiError, AppState, EventPath};
use crate::logic::{
    apply_config_to_all, auto_advance_byes, delete_fixtures, generate_fixtures, live_round,
    schedule_round, set_score,
};
use crate::models::{FixtureView, MatchConfig, MatchKey, ParticipantId, RoundView, Side};
use actix_web::{
    delete, get, post, put,
    web::{self, Json, Path},
    HttpResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Default)]
struct GenerateBody {
    /// Participant ids in seed order; random order when absent.
    #[serde(default)]
    seed_order: Option<Vec<String>>,
    #[serde(default)]
    config: Option<MatchConfig>,
}

#[derive(Deserialize)]
struct ScoreBody {
    /// 0-based.
    set_index: usize,
    side: Side,
    score: u32,
}

#[derive(Deserialize)]
struct ScheduleBody {
    scheduled_at: DateTime<Utc>,
}

/// Path segments: event plus bracket position.
#[derive(Deserialize)]
struct MatchPath {
    tournament_id: String,
    event_id: String,
    round: u32,
    match_index: u32,
}

/// Path segments: event plus round number.
#[derive(Deserialize)]
struct RoundPath {
    tournament_id: String,
    event_id: String,
    round: u32,
}

#[derive(Serialize)]
struct LiveResponse {
    active: Option<RoundView>,
    champion: Option<ParticipantId>,
}

fn event_path(tournament_id: &str, event_id: &str) -> EventPath {
    EventPath {
        tournament_id: tournament_id.to_string(),
        event_id: event_id.to_string(),
    }
}

/// All fixtures of an event, persisted and draft, ordered by round then match index.
#[get("/api/tournaments/{tournament_id}/events/{event_id}/fixtures")]
async fn api_list_fixtures(state: AppState, path: Path<EventPath>) -> Result<HttpResponse, ApiError> {
    let key = path.key()?;
    let store = read_store(&state)?;
    let fixtures: Vec<FixtureView> = store.board(&key).map(|b| b.fixtures()).unwrap_or_default();
    Ok(HttpResponse::Ok().json(fixtures))
}

/// Generate the knockout bracket from an explicit seed order (or a random one).
#[post("/api/tournaments/{tournament_id}/events/{event_id}/fixtures/generate")]
async fn api_generate_fixtures(
    state: AppState,
    path: Path<EventPath>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let key = path.key()?;
    let body: GenerateBody = if body.iter().all(u8::is_ascii_whitespace) {
        GenerateBody::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
    };
    let seed_order = body
        .seed_order
        .map(|ids| {
            ids.iter()
                .map(|id| parse_id(id, "participant id in seed order"))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;
    let mut store = write_store(&state)?;
    let board = board_mut(&mut store, &key)?;
    generate_fixtures(board, seed_order.as_deref(), body.config)?;
    Ok(HttpResponse::Created().json(board.bracket_view()))
}

/// Delete every fixture of the event so it can be generated again.
#[delete("/api/tournaments/{tournament_id}/events/{event_id}/fixtures")]
async fn api_delete_fixtures(state: AppState, path: Path<EventPath>) -> Result<HttpResponse, ApiError> {
    let key = path.key()?;
    let mut store = write_store(&state)?;
    let removed = delete_fixtures(board_mut(&mut store, &key)?);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Fixtures deleted successfully",
        "deleted": removed,
    })))
}

/// Rounds with names, fixtures and the champion once decided.
#[get("/api/tournaments/{tournament_id}/events/{event_id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<EventPath>) -> Result<HttpResponse, ApiError> {
    let key = path.key()?;
    let store = read_store(&state)?;
    Ok(HttpResponse::Ok().json(board(&store, &key)?.bracket_view()))
}

/// Round currently being played, for live scoring screens.
#[get("/api/tournaments/{tournament_id}/events/{event_id}/live")]
async fn api_live(state: AppState, path: Path<EventPath>) -> Result<HttpResponse, ApiError> {
    let key = path.key()?;
    let store = read_store(&state)?;
    let board = board(&store, &key)?;
    Ok(HttpResponse::Ok().json(LiveResponse {
        active: live_round(board),
        champion: board.champion(),
    }))
}

/// Enter one side's score for a set. Drafts are promoted on this first write.
#[put("/api/tournaments/{tournament_id}/events/{event_id}/matches/{round}/{match_index}/score")]
async fn api_set_score(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ScoreBody>,
) -> Result<HttpResponse, ApiError> {
    let key = event_path(&path.tournament_id, &path.event_id).key()?;
    let match_key = MatchKey::new(path.round, path.match_index);
    let mut store = write_store(&state)?;
    let board = board_mut(&mut store, &key)?;
    set_score(&mut board.bracket, match_key, body.set_index, body.side, body.score)?;
    Ok(HttpResponse::Ok().json(board.fixture_view(match_key)))
}

/// Schedule every match of a round at the same time.
#[put("/api/tournaments/{tournament_id}/events/{event_id}/rounds/{round}/schedule")]
async fn api_schedule_round(
    state: AppState,
    path: Path<RoundPath>,
    body: Json<ScheduleBody>,
) -> Result<HttpResponse, ApiError> {
    let key = event_path(&path.tournament_id, &path.event_id).key()?;
    let mut store = write_store(&state)?;
    let board = board_mut(&mut store, &key)?;
    schedule_round(&mut board.bracket, path.round, body.scheduled_at)?;
    Ok(HttpResponse::Ok().json(board.round_view(path.round)))
}

/// Apply one match configuration to every fixture of the event.
#[put("/api/tournaments/{tournament_id}/events/{event_id}/config")]
async fn api_apply_config(
    state: AppState,
    path: Path<EventPath>,
    body: Json<MatchConfig>,
) -> Result<HttpResponse, ApiError> {
    let key = path.key()?;
    let mut store = write_store(&state)?;
    let board = board_mut(&mut store, &key)?;
    apply_config_to_all(board, body.into_inner())?;
    Ok(HttpResponse::Ok().json(board.bracket_view()))
}

/// Advance every pending bye.
#[post("/api/tournaments/{tournament_id}/events/{event_id}/byes/advance")]
async fn api_advance_byes(state: AppState, path: Path<EventPath>) -> Result<HttpResponse, ApiError> {
    let key = path.key()?;
    let mut store = write_store(&state)?;
    let board = board_mut(&mut store, &key)?;
    let advanced = auto_advance_byes(&mut board.bracket)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "advanced": advanced,
        "bracket": board.bracket_view(),
    })))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_list_fixtures)
        .service(api_generate_fixtures)
        .service(api_delete_fixtures)
        .service(api_get_bracket)
        .service(api_live)
        .service(api_set_score)
        .service(api_schedule_round)
        .service(api_apply_config)
        .service(api_advance_byes);
}
