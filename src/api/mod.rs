//! REST API: actix-web handlers over a shared [`FixtureStore`].
//!
//! Every error response is JSON `{ "success": false, "message": ... }`.

mod events;
mod fixtures;
mod participants;

use crate::models::{EventBoard, EventKey, FixtureError};
use crate::store::FixtureStore;
use actix_web::{
    get,
    http::StatusCode,
    web::{self, Data},
    HttpResponse, ResponseError,
};
use serde::Deserialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use uuid::Uuid;

/// Shared application state: every event board behind one lock.
pub type AppState = Data<RwLock<FixtureStore>>;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A path or body identifier is not a valid id; rejected before touching the store.
    #[error("Invalid {0}")]
    InvalidId(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("No participants or fixtures for this event")]
    EventNotFound,
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error("Store lock poisoned")]
    Lock,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::EventNotFound => StatusCode::NOT_FOUND,
            ApiError::Lock => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Fixture(e) => match e {
                FixtureError::ParticipantNotFound(_)
                | FixtureError::FixtureNotFound(_)
                | FixtureError::MatchNotFound { .. }
                | FixtureError::NoBracket => StatusCode::NOT_FOUND,
                FixtureError::BracketExists | FixtureError::AlreadyPersisted { .. } => {
                    StatusCode::CONFLICT
                }
                _ => StatusCode::BAD_REQUEST,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "message": self.to_string(),
        }))
    }
}

/// Parse an identifier, naming what it is in the error.
pub(crate) fn parse_id(raw: &str, what: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::InvalidId(what))
}

pub(crate) fn read_store(state: &AppState) -> Result<RwLockReadGuard<'_, FixtureStore>, ApiError> {
    state.read().map_err(|_| ApiError::Lock)
}

pub(crate) fn write_store(state: &AppState) -> Result<RwLockWriteGuard<'_, FixtureStore>, ApiError> {
    state.write().map_err(|_| ApiError::Lock)
}

/// Path segments: tournament id and event id (e.g. /api/tournaments/{tournament_id}/events/{event_id})
#[derive(Deserialize)]
pub(crate) struct EventPath {
    tournament_id: String,
    event_id: String,
}

impl EventPath {
    pub(crate) fn key(&self) -> Result<EventKey, ApiError> {
        Ok(EventKey::new(
            parse_id(&self.tournament_id, "tournament id")?,
            parse_id(&self.event_id, "event id")?,
        ))
    }
}

pub(crate) fn board<'a>(store: &'a FixtureStore, key: &EventKey) -> Result<&'a EventBoard, ApiError> {
    store.board(key).ok_or(ApiError::EventNotFound)
}

pub(crate) fn board_mut<'a>(
    store: &'a mut FixtureStore,
    key: &EventKey,
) -> Result<&'a mut EventBoard, ApiError> {
    store.board_mut(key).ok_or(ApiError::EventNotFound)
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[get("/api/health")]
async fn api_health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-fixtures-web",
    })
}

/// Register every API route, plus JSON/path extractor errors in the common error shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .service(api_health);
    participants::configure(cfg);
    events::configure(cfg);
    fixtures::configure(cfg);
}
