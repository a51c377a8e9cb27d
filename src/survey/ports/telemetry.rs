//! Port for fire-and-forget operational telemetry.
//!
//! Telemetry is never required for correctness: implementations must not
//! block the caller for long and must not fail.

use chrono::TimeDelta;
use serde::Serialize;
use serde_json::Value;

/// Kind of remote dependency a call was made to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// HTTP API call.
    Http,
    /// SQL store call.
    Sql,
}

impl DependencyKind {
    /// Returns the kind's display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Sql => "SQL",
        }
    }
}

/// Named business event with arbitrary properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryEvent {
    /// Event name.
    pub name: String,
    /// Event properties.
    pub properties: Value,
}

impl TelemetryEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(name: impl Into<String>, properties: Value) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }
}

/// Completed call to a remote dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyTelemetry {
    /// Called system, e.g. `API:Language Detection`.
    pub target: String,
    /// Operation name.
    pub name: String,
    /// Kind of dependency.
    pub kind: DependencyKind,
    /// Measured call duration.
    #[serde(serialize_with = "serialize_millis")]
    pub duration: TimeDelta,
    /// Whether the call succeeded.
    pub success: bool,
}

/// Failure worth reporting even though the flow continued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionTelemetry {
    /// Operation that failed.
    pub operation: String,
    /// Rendered error message.
    pub message: String,
}

impl ExceptionTelemetry {
    /// Creates an exception report from an error.
    #[must_use]
    pub fn from_error(operation: impl Into<String>, error: &dyn std::error::Error) -> Self {
        Self {
            operation: operation.into(),
            message: error.to_string(),
        }
    }
}

/// Sink for operational telemetry.
pub trait Telemetry: Send + Sync {
    /// Records a business event.
    fn track_event(&self, event: TelemetryEvent);

    /// Records a completed dependency call.
    fn track_dependency(&self, dependency: DependencyTelemetry);

    /// Records a handled failure.
    fn track_exception(&self, exception: ExceptionTelemetry);
}

fn serialize_millis<S>(duration: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_i64(duration.num_milliseconds())
}
