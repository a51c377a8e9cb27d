//! Best-effort survey persistence.

use crate::survey::{
    domain::{SurveyUpsert, UpsertOutcome},
    ports::{DependencyKind, DependencyTelemetry, ExceptionTelemetry, SurveyRepository, Telemetry},
};
use mockable::Clock;
use std::sync::Arc;

/// Dependency name reported for survey store calls.
pub const SQL_DEPENDENCY: &str = "SQL:survey_results";

/// Writes survey records, absorbing store failures.
///
/// Failures are logged and reported to telemetry, then dropped. There is no
/// retry.
#[derive(Clone)]
pub struct SurveyRecorder<R, C>
where
    R: SurveyRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    telemetry: Arc<dyn Telemetry>,
    clock: Arc<C>,
}

impl<R, C> SurveyRecorder<R, C>
where
    R: SurveyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a recorder over a survey repository.
    #[must_use]
    pub const fn new(repository: Arc<R>, telemetry: Arc<dyn Telemetry>, clock: Arc<C>) -> Self {
        Self {
            repository,
            telemetry,
            clock,
        }
    }

    /// Upserts the record, returning `None` when the store failed.
    pub async fn record(&self, upsert: &SurveyUpsert) -> Option<UpsertOutcome> {
        let issue_id = upsert.issue_id();
        let started = self.clock.utc();
        let result = self.repository.upsert(upsert).await;
        self.telemetry.track_dependency(DependencyTelemetry {
            target: SQL_DEPENDENCY.to_owned(),
            name: "upsert_survey_result".to_owned(),
            kind: DependencyKind::Sql,
            duration: self.clock.utc() - started,
            success: result.is_ok(),
        });

        result
            .inspect(|outcome| {
                tracing::info!(%issue_id, ?outcome, "recorded survey result");
            })
            .inspect_err(|err| {
                tracing::error!(%issue_id, error = %err, "failed to record survey result");
                self.telemetry
                    .track_exception(ExceptionTelemetry::from_error("upsert_survey_result", err));
            })
            .ok()
    }
}
