//! HTTP error mapping for webhook deliveries.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::survey::{domain::SurveyDomainError, services::SurveyServiceError};

/// Errors returned to the webhook sender.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The delivery carried no `X-GitHub-Event` header.
    #[error("missing X-GitHub-Event header")]
    MissingEvent,

    /// The delivery names an event the bot does not subscribe to.
    #[error("unsupported webhook event '{0}'")]
    UnsupportedEvent(String),

    /// The body is not a valid payload for the event.
    #[error("invalid {event} payload: {source}")]
    InvalidJson {
        /// Event name from the delivery headers.
        event: String,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// The payload decoded but carries values the survey domain rejects.
    #[error("invalid {event} payload: {source}")]
    InvalidPayload {
        /// Event name from the delivery headers.
        event: String,
        /// Validation failure.
        #[source]
        source: SurveyDomainError,
    },

    /// The survey flow failed.
    #[error(transparent)]
    Survey(#[from] SurveyServiceError),
}

/// Convenience type alias for webhook handler return values.
pub type WebhookResult<T> = Result<T, WebhookError>;

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::MissingEvent | Self::UnsupportedEvent(_) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_EVENT")
            }
            Self::InvalidJson { .. } | Self::InvalidPayload { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD")
            }
            Self::Survey(err) => {
                tracing::error!(error = %err, "survey processing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "SURVEY_FAILED")
            }
        };

        let body = json!({
            "error": self.to_string(),
            "code": code,
        });
        (status, Json(body)).into_response()
    }
}
