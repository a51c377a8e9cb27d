//! Shared state for webhook handlers.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

use crate::survey::{
    ports::SurveyRepository,
    services::{
        ClosedPullRequest, PullRequestClosedOutcome, SurveyService, SurveyServiceResult,
        SurveyUpdate, SurveyUpdateOutcome,
    },
};

/// Receiver of decoded survey events.
#[async_trait]
pub trait SurveyEventSink: Send + Sync {
    /// Handles a closed pull request.
    ///
    /// # Errors
    ///
    /// Returns the survey service error when the survey cannot be rendered.
    async fn pull_request_closed(
        &self,
        pull_request: ClosedPullRequest,
    ) -> SurveyServiceResult<PullRequestClosedOutcome>;

    /// Handles an edit of, or comment on, a survey issue.
    async fn survey_updated(&self, update: SurveyUpdate) -> SurveyUpdateOutcome;
}

#[async_trait]
impl<R, C> SurveyEventSink for SurveyService<R, C>
where
    R: SurveyRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    async fn pull_request_closed(
        &self,
        pull_request: ClosedPullRequest,
    ) -> SurveyServiceResult<PullRequestClosedOutcome> {
        self.handle_pull_request_closed(pull_request).await
    }

    async fn survey_updated(&self, update: SurveyUpdate) -> SurveyUpdateOutcome {
        self.handle_survey_update(update).await
    }
}

/// Shared application state available to handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Survey event handler.
    pub surveys: Arc<dyn SurveyEventSink>,
}

impl AppState {
    /// Creates state around a survey event handler.
    #[must_use]
    pub const fn new(surveys: Arc<dyn SurveyEventSink>) -> Self {
        Self { surveys }
    }
}
