//! Application services for the survey lifecycle.

mod language;
mod recorder;
mod survey;

pub use language::{LANGUAGE_DEPENDENCY, LanguageDetector};
pub use recorder::{SQL_DEPENDENCY, SurveyRecorder};
pub use survey::{
    ClosedPullRequest, PullRequestClosedOutcome, SurveyPorts, SurveyService, SurveyServiceError,
    SurveyServiceResult, SurveyUpdate, SurveyUpdateOutcome,
};
