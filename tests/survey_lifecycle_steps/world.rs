//! Shared world state for survey lifecycle BDD scenarios.

use std::sync::Arc;

use camino::Utf8Path;
use chrono::Utc;
use copilot_survey::survey::{
    adapters::{
        memory::{
            FixedLanguageClient, InMemoryIssueTracker, InMemorySurveyRepository,
            RecordingTelemetry,
        },
        templates::DirTemplateSource,
    },
    domain::{RepositoryRef, SurveyIssueContext},
    ports::CreatedIssue,
    services::{SurveyPorts, SurveyService, SurveyUpdate, SurveyUpdateOutcome},
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestSurveyService = SurveyService<InMemorySurveyRepository, DefaultClock>;

/// Survey issue opened during a scenario.
pub struct OpenSurvey {
    pub issue: CreatedIssue,
    pub title: String,
    pub body: String,
    pub author: String,
}

/// Scenario world for survey lifecycle behaviour tests.
pub struct SurveyWorld {
    pub repository: Arc<InMemorySurveyRepository>,
    pub tracker: InMemoryIssueTracker,
    pub telemetry: RecordingTelemetry,
    pub repository_ref: Option<RepositoryRef>,
    pub detected_language: String,
    pub survey: Option<OpenSurvey>,
    pub last_update: Option<SurveyUpdateOutcome>,
}

impl SurveyWorld {
    /// Creates a world with empty stores and English detection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemorySurveyRepository::new()),
            tracker: InMemoryIssueTracker::new(),
            telemetry: RecordingTelemetry::new(),
            repository_ref: None,
            detected_language: "en".to_owned(),
            survey: None,
            last_update: None,
        }
    }

    /// Builds a survey service over the world's shared adapters.
    pub fn service(&self) -> Result<TestSurveyService, eyre::Report> {
        let template_dir = Utf8Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/issue_template"));
        let templates =
            DirTemplateSource::open(template_dir).wrap_err("open survey template directory")?;
        Ok(SurveyService::new(
            SurveyPorts {
                repository: Arc::clone(&self.repository),
                language: Arc::new(FixedLanguageClient::detecting(
                    self.detected_language.clone(),
                )),
                templates: Arc::new(templates),
                tracker: Arc::new(self.tracker.clone()),
                telemetry: Arc::new(self.telemetry.clone()),
            },
            Arc::new(DefaultClock),
        ))
    }

    /// Returns the repository named by the scenario.
    pub fn repository_ref(&self) -> Result<RepositoryRef, eyre::Report> {
        self.repository_ref
            .clone()
            .ok_or_else(|| eyre::eyre!("missing repository in scenario world"))
    }

    /// Returns the survey opened earlier in the scenario.
    pub fn open_survey(&self) -> Result<&OpenSurvey, eyre::Report> {
        self.survey
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing survey issue in scenario world"))
    }

    /// Builds the update event the issue tracker would deliver for the
    /// current survey body.
    pub fn survey_update(&self, comment: Option<String>) -> Result<SurveyUpdate, eyre::Report> {
        let survey = self.open_survey()?;
        Ok(SurveyUpdate {
            context: SurveyIssueContext {
                enterprise_name: None,
                repository: self.repository_ref()?,
                issue_id: survey.issue.id,
                issue_number: survey.issue.number,
                assignee_login: Some(survey.author.clone()),
                created_at: survey.issue.created_at,
                updated_at: Utc::now(),
            },
            title: survey.title.clone(),
            body: Some(survey.body.clone()),
            comment,
        })
    }
}

impl Default for SurveyWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SurveyWorld {
    SurveyWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
