//! Orchestration of the survey lifecycle.
//!
//! A closed pull request opens a localized survey issue assigned to its
//! author. Edits and comments on that issue are parsed, recorded, and close
//! the issue once a definitive answer is present.

use super::{LanguageDetector, SurveyRecorder};
use crate::survey::{
    domain::{
        IssueNumber, LanguageCode, MalformedSurveyBodyError, PullRequestNumber, RepositoryRef,
        SurveyAnswer, SurveyIssueContext, SurveyResponse, SurveyTitle, SurveyUpsert,
        UpsertOutcome,
    },
    ports::{
        ExceptionTelemetry, IssueTracker, LanguageDetectionClient, NewSurveyIssue,
        SurveyRepository, Telemetry, TelemetryEvent, TemplateError, TemplateSource,
    },
};
use mockable::Clock;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Pull request that has just been closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedPullRequest {
    /// Repository the pull request belongs to.
    pub repository: RepositoryRef,
    /// Pull request number.
    pub number: PullRequestNumber,
    /// Pull request description, if any.
    pub body: Option<String>,
    /// Login of the pull request author.
    pub author_login: Option<String>,
    /// Enterprise owning the repository, when the event carries one.
    pub enterprise_name: Option<String>,
}

/// Edit of, or new comment on, an issue that may be a survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyUpdate {
    /// Issue context used when the record is written.
    pub context: SurveyIssueContext,
    /// Current issue title.
    pub title: String,
    /// Current issue body.
    pub body: Option<String>,
    /// Text of the comment that triggered the update, for comment events.
    pub comment: Option<String>,
}

/// Result of handling a closed pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PullRequestClosedOutcome {
    /// A survey issue was opened.
    SurveyOpened {
        /// Number of the new survey issue.
        issue_number: IssueNumber,
        /// Language the survey was rendered in.
        language: LanguageCode,
        /// Outcome of recording the pending survey, `None` if that failed.
        recorded: Option<UpsertOutcome>,
    },
    /// The issue tracker rejected the new survey issue.
    IssueCreationFailed {
        /// Language the survey was rendered in.
        language: LanguageCode,
    },
}

/// Result of handling a survey issue update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SurveyUpdateOutcome {
    /// The issue is not a survey issue.
    NotASurvey,
    /// The survey body could not be interpreted.
    Malformed {
        /// Parse failure description.
        reason: String,
    },
    /// The answer is not yet worth recording.
    NothingToRecord {
        /// Surveyed pull request number.
        pr_number: PullRequestNumber,
    },
    /// The answer was recorded.
    Recorded {
        /// Surveyed pull request number.
        pr_number: PullRequestNumber,
        /// Outcome of the upsert, `None` if the store failed.
        recorded: Option<UpsertOutcome>,
        /// Whether the survey issue was closed.
        closed: bool,
    },
}

/// Service-level errors for survey orchestration.
///
/// Only template failures escape; every remote failure is absorbed.
#[derive(Debug, Error)]
pub enum SurveyServiceError {
    /// The survey template for the detected language could not be loaded.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type for survey service operations.
pub type SurveyServiceResult<T> = Result<T, SurveyServiceError>;

/// Collaborators of the survey service.
pub struct SurveyPorts<R>
where
    R: SurveyRepository,
{
    /// Survey record store.
    pub repository: Arc<R>,
    /// Remote language detection.
    pub language: Arc<dyn LanguageDetectionClient>,
    /// Localized survey templates.
    pub templates: Arc<dyn TemplateSource>,
    /// Issue tracker hosting the surveys.
    pub tracker: Arc<dyn IssueTracker>,
    /// Telemetry sink.
    pub telemetry: Arc<dyn Telemetry>,
}

/// Survey lifecycle orchestration service.
#[derive(Clone)]
pub struct SurveyService<R, C>
where
    R: SurveyRepository,
    C: Clock + Send + Sync,
{
    detector: LanguageDetector<C>,
    recorder: SurveyRecorder<R, C>,
    templates: Arc<dyn TemplateSource>,
    tracker: Arc<dyn IssueTracker>,
    telemetry: Arc<dyn Telemetry>,
}

impl<R, C> SurveyService<R, C>
where
    R: SurveyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a survey service.
    #[must_use]
    pub fn new(ports: SurveyPorts<R>, clock: Arc<C>) -> Self {
        let SurveyPorts {
            repository,
            language,
            templates,
            tracker,
            telemetry,
        } = ports;
        Self {
            detector: LanguageDetector::new(language, Arc::clone(&telemetry), Arc::clone(&clock)),
            recorder: SurveyRecorder::new(repository, Arc::clone(&telemetry), clock),
            templates,
            tracker,
            telemetry,
        }
    }

    /// Opens a survey issue for a closed pull request.
    ///
    /// The survey is written in the language of the pull request description
    /// and assigned to the pull request author. A pending record is stored
    /// once the issue exists.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyServiceError::Template`] when no template can be
    /// loaded for the detected language.
    pub async fn handle_pull_request_closed(
        &self,
        pull_request: ClosedPullRequest,
    ) -> SurveyServiceResult<PullRequestClosedOutcome> {
        self.telemetry.track_event(TelemetryEvent::new(
            "pull_request_closed",
            json!({
                "repository": pull_request.repository.to_string(),
                "pr_number": pull_request.number.value(),
            }),
        ));

        let language = self.detector.detect(pull_request.body.as_deref()).await;
        let template = self.templates.load(language).inspect_err(|err| {
            tracing::error!(%language, error = %err, "failed to load survey template");
        })?;

        let new_issue = NewSurveyIssue {
            repository: pull_request.repository.clone(),
            title: SurveyTitle::for_pull_request(pull_request.number),
            body: template.render(pull_request.number),
            assignee: pull_request.author_login.clone(),
        };

        let created = match self.tracker.create_issue(&new_issue).await {
            Ok(created) => created,
            Err(err) => {
                tracing::error!(
                    repository = %pull_request.repository,
                    pr_number = %pull_request.number,
                    error = %err,
                    "failed to open survey issue"
                );
                self.telemetry
                    .track_exception(ExceptionTelemetry::from_error("create_issue", &err));
                return Ok(PullRequestClosedOutcome::IssueCreationFailed { language });
            }
        };
        tracing::info!(
            repository = %pull_request.repository,
            pr_number = %pull_request.number,
            issue_number = %created.number,
            %language,
            "opened survey issue"
        );

        let ClosedPullRequest {
            repository,
            number,
            author_login,
            enterprise_name,
            ..
        } = pull_request;
        let context = SurveyIssueContext {
            enterprise_name,
            repository,
            issue_id: created.id,
            issue_number: created.number,
            assignee_login: author_login,
            created_at: created.created_at,
            updated_at: created.updated_at,
        };
        let recorded = self
            .recorder
            .record(&SurveyUpsert::new(context, SurveyAnswer::pending(number)))
            .await;

        Ok(PullRequestClosedOutcome::SurveyOpened {
            issue_number: created.number,
            language,
            recorded,
        })
    }

    /// Records the answer carried by a survey issue edit or comment.
    ///
    /// Issues whose title lacks the survey marker are ignored. The issue is
    /// closed once the answer is definitive; close failures are logged and
    /// reported, never returned.
    pub async fn handle_survey_update(&self, update: SurveyUpdate) -> SurveyUpdateOutcome {
        if !SurveyTitle::matches(&update.title) {
            tracing::debug!(title = %update.title, "ignoring non-survey issue");
            return SurveyUpdateOutcome::NotASurvey;
        }
        let event_name = if update.comment.is_some() {
            "survey_comment_created"
        } else {
            "survey_issue_edited"
        };
        self.telemetry.track_event(TelemetryEvent::new(
            event_name,
            json!({
                "repository": update.context.repository.to_string(),
                "issue_number": update.context.issue_number.value(),
            }),
        ));

        let body = update.body.as_deref().unwrap_or_default();
        match SurveyResponse::parse(body, update.comment.as_deref()) {
            Ok(response) => self.record_response(update.context, &response).await,
            Err(MalformedSurveyBodyError::NoCheckedOptions { pr_number }) => {
                self.record_comment_only(update.context, pr_number, update.comment)
                    .await
            }
            Err(err @ MalformedSurveyBodyError::MissingPullRequestNumber) => {
                tracing::warn!(
                    issue_number = %update.context.issue_number,
                    error = %err,
                    "survey body has no pull request reference; skipping"
                );
                SurveyUpdateOutcome::Malformed {
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn record_response(
        &self,
        context: SurveyIssueContext,
        response: &SurveyResponse,
    ) -> SurveyUpdateOutcome {
        let pr_number = match PullRequestNumber::new(response.pr_number()) {
            Ok(pr_number) => pr_number,
            Err(err) => return malformed(&context, &err),
        };
        if !response.should_persist() {
            tracing::debug!(%pr_number, "survey answer incomplete; nothing to record");
            return SurveyUpdateOutcome::NothingToRecord { pr_number };
        }

        let repository = context.repository.clone();
        let issue_number = context.issue_number;
        let answer = SurveyAnswer::from_response(pr_number, response);
        let recorded = self
            .recorder
            .record(&SurveyUpsert::new(context, answer))
            .await;

        let closed = if response.should_close() {
            self.close_survey(&repository, issue_number).await
        } else {
            false
        };

        SurveyUpdateOutcome::Recorded {
            pr_number,
            recorded,
            closed,
        }
    }

    async fn record_comment_only(
        &self,
        context: SurveyIssueContext,
        raw_pr_number: u64,
        comment: Option<String>,
    ) -> SurveyUpdateOutcome {
        let pr_number = match PullRequestNumber::new(raw_pr_number) {
            Ok(pr_number) => pr_number,
            Err(err) => return malformed(&context, &err),
        };
        let Some(comment_text) = comment else {
            tracing::debug!(%pr_number, "no option ticked and no comment; nothing to record");
            return SurveyUpdateOutcome::NothingToRecord { pr_number };
        };

        let answer = SurveyAnswer::comment_only(pr_number, comment_text);
        let recorded = self
            .recorder
            .record(&SurveyUpsert::new(context, answer))
            .await;
        SurveyUpdateOutcome::Recorded {
            pr_number,
            recorded,
            closed: false,
        }
    }

    async fn close_survey(&self, repository: &RepositoryRef, issue_number: IssueNumber) -> bool {
        match self.tracker.close_issue(repository, issue_number).await {
            Ok(()) => {
                tracing::info!(%repository, %issue_number, "closed answered survey issue");
                true
            }
            Err(err) => {
                tracing::error!(
                    %repository,
                    %issue_number,
                    error = %err,
                    "failed to close survey issue"
                );
                self.telemetry
                    .track_exception(ExceptionTelemetry::from_error("close_issue", &err));
                false
            }
        }
    }
}

fn malformed(context: &SurveyIssueContext, err: &dyn std::error::Error) -> SurveyUpdateOutcome {
    tracing::warn!(
        issue_number = %context.issue_number,
        error = %err,
        "survey body references an invalid pull request number; skipping"
    );
    SurveyUpdateOutcome::Malformed {
        reason: err.to_string(),
    }
}
