//! Error types for survey domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing survey domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SurveyDomainError {
    /// The issue identifier is invalid.
    #[error("invalid issue identifier {0}, expected a positive integer")]
    InvalidIssueId(u64),

    /// The issue number is invalid.
    #[error("invalid issue number {0}, expected a positive integer")]
    InvalidIssueNumber(u64),

    /// The pull request number is invalid.
    #[error("invalid pull request number {0}, expected a positive integer")]
    InvalidPullRequestNumber(u64),

    /// The repository owner or name is empty.
    #[error("invalid repository '{owner}/{name}'")]
    InvalidRepository {
        /// Owner login as received.
        owner: String,
        /// Repository name as received.
        name: String,
    },
}

/// Error returned when a survey issue body cannot yield an answer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedSurveyBodyError {
    /// The body does not reference a pull request number.
    #[error("survey body does not reference a pull request number")]
    MissingPullRequestNumber,

    /// The body references a pull request but no option is checked yet.
    #[error("survey body for pull request #{pr_number} has no checked option")]
    NoCheckedOptions {
        /// Pull request number found in the body.
        pr_number: u64,
    },
}

/// Error returned while parsing a language code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported language code: {0}")]
pub struct ParseLanguageCodeError(pub String);
