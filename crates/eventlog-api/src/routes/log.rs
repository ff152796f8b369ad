//! The intake route: `POST` one event or an array of events.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::post};
use eventlog_intake::domain::outcome::IntakeOutcome;
use eventlog_intake::domain::payload::IntakePayload;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::state::AppState;

/// HTTP rendering of an `IntakeOutcome`: `202` with no body, or `400` with
/// `{ "message"?, "validCount"? }`.
#[derive(Debug)]
pub struct IntakeResponse(pub IntakeOutcome);

impl IntoResponse for IntakeResponse {
    fn into_response(self) -> Response {
        match self.0 {
            IntakeOutcome::Accepted => StatusCode::ACCEPTED.into_response(),
            IntakeOutcome::Rejected(rejection) => {
                (StatusCode::BAD_REQUEST, Json(rejection)).into_response()
            }
        }
    }
}

/// POST {log route}
#[instrument(skip(state, payload), fields(batch = payload.is_batch(), events = payload.event_count()))]
async fn log_events(
    State(state): State<AppState>,
    Json(payload): Json<IntakePayload>,
) -> IntakeResponse {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling log request");

    let outcome = state.intake.handle(payload);

    info!(%correlation_id, status = outcome.status_code(), "handled log request");
    IntakeResponse(outcome)
}

/// Returns the router for the intake route mounted at `path`.
pub fn router(path: &str) -> Router<AppState> {
    Router::new().route(path, post(log_events))
}
