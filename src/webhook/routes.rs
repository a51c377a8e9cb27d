//! Webhook and health routes.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use super::error::{WebhookError, WebhookResult};
use super::payload::{
    COMMENT_CREATED, ISSUE_EDITED, IssueCommentEvent, IssuesEvent, PULL_REQUEST_CLOSED,
    PullRequestEvent,
};
use super::state::AppState;
use crate::survey::services::{PullRequestClosedOutcome, SurveyUpdateOutcome};

/// Header naming the webhook event.
pub const EVENT_HEADER: &str = "x-github-event";
/// Header carrying the unique delivery identifier.
pub const DELIVERY_HEADER: &str = "x-github-delivery";

/// Body returned for every accepted delivery.
#[derive(Debug, Serialize)]
#[serde(tag = "result", content = "detail", rename_all = "snake_case")]
pub enum WebhookResponse {
    /// Reply to the `ping` sent when a webhook is configured.
    Pong,
    /// The event or action is not one the bot acts on.
    Ignored {
        /// Event name.
        event: String,
        /// Event action.
        action: String,
    },
    /// A closed pull request was handled.
    PullRequestClosed(PullRequestClosedOutcome),
    /// A survey issue edit or comment was handled.
    SurveyUpdated(SurveyUpdateOutcome),
}

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// Builds the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health -- returns service liveness.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /webhook -- decodes one GitHub delivery and processes it inline.
async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> WebhookResult<Json<WebhookResponse>> {
    let event = headers
        .get(EVENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(WebhookError::MissingEvent)?
        .to_owned();
    let delivery = headers
        .get(DELIVERY_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok());

    let span = tracing::info_span!("webhook", event = %event, delivery = ?delivery);
    dispatch(&state, event, &body)
        .instrument(span)
        .await
        .map(Json)
}

async fn dispatch(state: &AppState, event: String, body: &[u8]) -> WebhookResult<WebhookResponse> {
    match event.as_str() {
        "ping" => Ok(WebhookResponse::Pong),
        "pull_request" => {
            let payload: PullRequestEvent = decode(&event, body)?;
            if payload.action != PULL_REQUEST_CLOSED {
                return Ok(ignored(event, payload.action));
            }
            let pull_request = payload
                .into_closed_pull_request()
                .map_err(|source| WebhookError::InvalidPayload { event, source })?;
            let outcome = state.surveys.pull_request_closed(pull_request).await?;
            Ok(WebhookResponse::PullRequestClosed(outcome))
        }
        "issues" => {
            let payload: IssuesEvent = decode(&event, body)?;
            if payload.action != ISSUE_EDITED {
                return Ok(ignored(event, payload.action));
            }
            let update = payload
                .into_survey_update()
                .map_err(|source| WebhookError::InvalidPayload { event, source })?;
            Ok(WebhookResponse::SurveyUpdated(
                state.surveys.survey_updated(update).await,
            ))
        }
        "issue_comment" => {
            let payload: IssueCommentEvent = decode(&event, body)?;
            if payload.action != COMMENT_CREATED {
                return Ok(ignored(event, payload.action));
            }
            let update = payload
                .into_survey_update()
                .map_err(|source| WebhookError::InvalidPayload { event, source })?;
            Ok(WebhookResponse::SurveyUpdated(
                state.surveys.survey_updated(update).await,
            ))
        }
        _ => Err(WebhookError::UnsupportedEvent(event)),
    }
}

fn decode<T: DeserializeOwned>(event: &str, body: &[u8]) -> WebhookResult<T> {
    serde_json::from_slice(body).map_err(|source| WebhookError::InvalidJson {
        event: event.to_owned(),
        source,
    })
}

fn ignored(event: String, action: String) -> WebhookResponse {
    tracing::debug!(%event, %action, "ignoring webhook action");
    WebhookResponse::Ignored { event, action }
}
