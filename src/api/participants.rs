//! Participant registry endpoints.

use super::{board_mut, parse_id, read_store, write_store, ApiError, AppState, EventPath};
use crate::logic::parse_participants_csv;
use crate::models::{Participant, ParticipantInput};
use actix_web::{
    delete, get, post, put,
    web::{self, Json, Path},
    HttpResponse,
};
use serde::Deserialize;

/// Path segments: event plus participant id.
#[derive(Deserialize)]
struct ParticipantPath {
    tournament_id: String,
    event_id: String,
    participant_id: String,
}

impl ParticipantPath {
    fn event(&self) -> EventPath {
        EventPath {
            tournament_id: self.tournament_id.clone(),
            event_id: self.event_id.clone(),
        }
    }
}

/// List participants of an event (empty when nobody registered yet).
#[get("/api/tournaments/{tournament_id}/events/{event_id}/participants")]
async fn api_list_participants(
    state: AppState,
    path: Path<EventPath>,
) -> Result<HttpResponse, ApiError> {
    let key = path.key()?;
    let store = read_store(&state)?;
    let participants: &[Participant] = store
        .board(&key)
        .map(|b| b.participants.as_slice())
        .unwrap_or_default();
    Ok(HttpResponse::Ok().json(participants))
}

/// Register a participant (creates the event board on first registration).
#[post("/api/tournaments/{tournament_id}/events/{event_id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<EventPath>,
    body: Json<ParticipantInput>,
) -> Result<HttpResponse, ApiError> {
    let key = path.key()?;
    let mut store = write_store(&state)?;
    let participant = store.board_or_create(key).add_participant(&body)?;
    Ok(HttpResponse::Created().json(participant))
}

/// Bulk registration from CSV (`name,partner,group` header). All-or-nothing.
#[post("/api/tournaments/{tournament_id}/events/{event_id}/participants/import")]
async fn api_import_participants(
    state: AppState,
    path: Path<EventPath>,
    body: String,
) -> Result<HttpResponse, ApiError> {
    let key = path.key()?;
    let inputs = parse_participants_csv(&body)?;
    let mut store = write_store(&state)?;
    let board = store.board_or_create(key);
    let added = board.add_participants(&inputs)?;
    log::info!("Imported {} participants into event {}", added, key.event_id);
    Ok(HttpResponse::Ok().json(&board.participants))
}

/// Edit name, partner or group.
#[put("/api/tournaments/{tournament_id}/events/{event_id}/participants/{participant_id}")]
async fn api_update_participant(
    state: AppState,
    path: Path<ParticipantPath>,
    body: Json<ParticipantInput>,
) -> Result<HttpResponse, ApiError> {
    let key = path.event().key()?;
    let id = parse_id(&path.participant_id, "participant id")?;
    let mut store = write_store(&state)?;
    let participant = board_mut(&mut store, &key)?.update_participant(id, &body)?;
    Ok(HttpResponse::Ok().json(participant))
}

/// Remove a participant; a bracket that includes them is cleared.
#[delete("/api/tournaments/{tournament_id}/events/{event_id}/participants/{participant_id}")]
async fn api_remove_participant(
    state: AppState,
    path: Path<ParticipantPath>,
) -> Result<HttpResponse, ApiError> {
    let key = path.event().key()?;
    let id = parse_id(&path.participant_id, "participant id")?;
    let mut store = write_store(&state)?;
    let fixtures_removed = board_mut(&mut store, &key)?.remove_participant(id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Participant deleted successfully",
        "fixtures_removed": fixtures_removed,
    })))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_import_participants)
        .service(api_list_participants)
        .service(api_add_participant)
        .service(api_update_participant)
        .service(api_remove_participant);
}
