//! Port contracts for the survey flow.
//!
//! Ports define infrastructure-agnostic interfaces used by survey services.

pub mod language;
pub mod repository;
pub mod telemetry;
pub mod templates;
pub mod tracker;

pub use language::{LanguageDetectionClient, LanguageDetectionError};
pub use repository::{SurveyRepository, SurveyRepositoryError, SurveyRepositoryResult};
pub use telemetry::{
    DependencyKind, DependencyTelemetry, ExceptionTelemetry, Telemetry, TelemetryEvent,
};
pub use templates::{TemplateError, TemplateSource};
pub use tracker::{
    CreatedIssue, IssueTracker, IssueTrackerError, IssueTrackerResult, NewSurveyIssue,
};

#[cfg(test)]
pub use language::MockLanguageDetectionClient;
#[cfg(test)]
pub use tracker::MockIssueTracker;
