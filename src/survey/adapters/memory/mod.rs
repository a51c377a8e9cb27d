//! In-memory adapters for tests and local runs.

mod language;
mod repository;
mod telemetry;
mod templates;
mod tracker;

pub use language::FixedLanguageClient;
pub use repository::InMemorySurveyRepository;
pub use telemetry::{RecordingTelemetry, TelemetryItem};
pub use templates::InMemoryTemplateSource;
pub use tracker::InMemoryIssueTracker;
