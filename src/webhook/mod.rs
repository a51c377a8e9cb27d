//! Inbound GitHub webhook surface.
//!
//! A single `POST /webhook` endpoint receives deliveries, decodes the
//! events the survey flow subscribes to, and processes each one inline.
//! `GET /health` reports liveness.

mod error;
pub mod payload;
mod routes;
mod state;

pub use error::{WebhookError, WebhookResult};
pub use routes::{DELIVERY_HEADER, EVENT_HEADER, HealthResponse, WebhookResponse, router};
pub use state::{AppState, SurveyEventSink};
