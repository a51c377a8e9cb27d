//! Language detection with a guaranteed fallback.

use crate::survey::{
    domain::LanguageCode,
    ports::{
        DependencyKind, DependencyTelemetry, ExceptionTelemetry, LanguageDetectionClient,
        Telemetry,
    },
};
use mockable::Clock;
use std::sync::Arc;

/// Dependency name reported for language detection calls.
pub const LANGUAGE_DEPENDENCY: &str = "API:Language Detection";

/// Detects the survey language of a pull request description.
///
/// Detection never fails: blank input, unsupported languages and every
/// remote failure resolve to [`LanguageCode::FALLBACK`].
#[derive(Clone)]
pub struct LanguageDetector<C>
where
    C: Clock + Send + Sync,
{
    client: Arc<dyn LanguageDetectionClient>,
    telemetry: Arc<dyn Telemetry>,
    clock: Arc<C>,
}

impl<C> LanguageDetector<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a detector over a remote detection client.
    #[must_use]
    pub const fn new(
        client: Arc<dyn LanguageDetectionClient>,
        telemetry: Arc<dyn Telemetry>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            client,
            telemetry,
            clock,
        }
    }

    /// Returns the survey language for `text`.
    ///
    /// Absent or whitespace-only text resolves to the fallback without a
    /// remote call; otherwise exactly one detection request is made.
    pub async fn detect(&self, text: Option<&str>) -> LanguageCode {
        let Some(document) = text.filter(|candidate| !candidate.trim().is_empty()) else {
            tracing::debug!("no description to analyse; using fallback language");
            return LanguageCode::FALLBACK;
        };

        let started = self.clock.utc();
        let result = self.client.detect_language(document).await;
        self.telemetry.track_dependency(DependencyTelemetry {
            target: LANGUAGE_DEPENDENCY.to_owned(),
            name: "detect_language".to_owned(),
            kind: DependencyKind::Http,
            duration: self.clock.utc() - started,
            success: result.is_ok(),
        });

        match result {
            Ok(code) => {
                let language = LanguageCode::from_detected(&code);
                tracing::info!(detected = %code, %language, "detected description language");
                language
            }
            Err(err) => {
                tracing::error!(error = %err, "language detection failed; using fallback language");
                self.telemetry
                    .track_exception(ExceptionTelemetry::from_error("detect_language", &err));
                LanguageCode::FALLBACK
            }
        }
    }
}
