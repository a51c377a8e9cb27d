//! Port for the issue tracker hosting survey issues.

use crate::survey::domain::{IssueId, IssueNumber, RepositoryRef};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for issue tracker operations.
pub type IssueTrackerResult<T> = Result<T, IssueTrackerError>;

/// Request to open a survey issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSurveyIssue {
    /// Repository to open the issue in.
    pub repository: RepositoryRef,
    /// Issue title.
    pub title: String,
    /// Rendered markdown body.
    pub body: String,
    /// Login to assign the issue to.
    pub assignee: Option<String>,
}

/// Issue created by the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Platform-assigned identifier.
    pub id: IssueId,
    /// Issue number within the repository.
    pub number: IssueNumber,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Issue tracker operations used by the survey flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Opens a new issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError`] when the tracker rejects the request.
    async fn create_issue(&self, issue: &NewSurveyIssue) -> IssueTrackerResult<CreatedIssue>;

    /// Closes an existing issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError`] when the tracker rejects the request.
    async fn close_issue(
        &self,
        repository: &RepositoryRef,
        issue_number: IssueNumber,
    ) -> IssueTrackerResult<()>;
}

/// Errors from the issue tracker.
#[derive(Debug, Error)]
pub enum IssueTrackerError {
    /// The HTTP request itself failed.
    #[error("issue tracker request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The tracker returned a non-2xx status code.
    #[error("issue tracker returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The tracker returned values the domain rejects.
    #[error("issue tracker returned an invalid issue: {0}")]
    InvalidIssue(String),
}
