//! Domain model for the usage survey.
//!
//! The survey domain covers survey languages and templates, answer parsing,
//! and the survey record written for each survey issue. Everything here is
//! free of I/O.

mod error;
mod ids;
mod language;
mod record;
mod response;
mod template;

pub use error::{MalformedSurveyBodyError, ParseLanguageCodeError, SurveyDomainError};
pub use ids::{IssueId, IssueNumber, PullRequestNumber, RepositoryRef};
pub use language::LanguageCode;
pub use record::{
    SurveyAnswer, SurveyIssueContext, SurveyRecord, SurveyUpsert, UpsertOutcome,
};
pub use response::{SurveyResponse, UsagePercentage};
pub use template::{IssueTemplate, PR_PLACEHOLDER, SURVEY_TITLE_PREFIX, SurveyTitle, dedent};
