//! GitHub webhook payload types for the events the bot acts on.
//!
//! Only the fields the survey flow reads are modelled; everything else in
//! the payload is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::survey::{
    domain::{
        IssueId, IssueNumber, PullRequestNumber, RepositoryRef, SurveyDomainError,
        SurveyIssueContext,
    },
    services::{ClosedPullRequest, SurveyUpdate},
};

/// Action of a `pull_request` event that opens a survey.
pub const PULL_REQUEST_CLOSED: &str = "closed";
/// Action of an `issues` event that records an answer.
pub const ISSUE_EDITED: &str = "edited";
/// Action of an `issue_comment` event that records an answer.
pub const COMMENT_CREATED: &str = "created";

/// Payload of a `pull_request` event.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// Event action, e.g. `closed`.
    pub action: String,
    /// Pull request the event is about.
    pub pull_request: PullRequest,
    /// Repository the pull request belongs to.
    pub repository: Repository,
    /// Enterprise owning the repository, for enterprise installations.
    #[serde(default)]
    pub enterprise: Option<Enterprise>,
}

/// Payload of an `issues` event.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuesEvent {
    /// Event action, e.g. `edited`.
    pub action: String,
    /// Issue the event is about.
    pub issue: Issue,
    /// Repository the issue belongs to.
    pub repository: Repository,
    /// Enterprise owning the repository, for enterprise installations.
    #[serde(default)]
    pub enterprise: Option<Enterprise>,
}

/// Payload of an `issue_comment` event.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueCommentEvent {
    /// Event action, e.g. `created`.
    pub action: String,
    /// Issue the comment was left on.
    pub issue: Issue,
    /// The comment itself.
    pub comment: Comment,
    /// Repository the issue belongs to.
    pub repository: Repository,
    /// Enterprise owning the repository, for enterprise installations.
    #[serde(default)]
    pub enterprise: Option<Enterprise>,
}

/// Pull request fields used by the bot.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Description markdown.
    #[serde(default)]
    pub body: Option<String>,
    /// Author account.
    #[serde(default)]
    pub user: Option<Account>,
}

/// Issue fields used by the bot.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Platform-assigned identifier.
    pub id: u64,
    /// Number within the repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body markdown.
    #[serde(default)]
    pub body: Option<String>,
    /// Assigned account.
    #[serde(default)]
    pub assignee: Option<Account>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Issue comment fields used by the bot.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    /// Comment markdown.
    #[serde(default)]
    pub body: Option<String>,
}

/// Repository fields used by the bot.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Repository name.
    pub name: String,
    /// Owning account.
    pub owner: Account,
}

/// GitHub user or organisation.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Account login.
    pub login: String,
}

/// GitHub enterprise.
#[derive(Debug, Clone, Deserialize)]
pub struct Enterprise {
    /// Enterprise display name.
    pub name: String,
}

impl Repository {
    fn to_ref(&self) -> Result<RepositoryRef, SurveyDomainError> {
        RepositoryRef::new(self.owner.login.as_str(), self.name.as_str())
    }
}

impl PullRequestEvent {
    /// Converts the payload into the survey service input.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyDomainError`] when the repository or pull request
    /// number is invalid.
    pub fn into_closed_pull_request(self) -> Result<ClosedPullRequest, SurveyDomainError> {
        Ok(ClosedPullRequest {
            repository: self.repository.to_ref()?,
            number: PullRequestNumber::new(self.pull_request.number)?,
            body: self.pull_request.body,
            author_login: self.pull_request.user.map(|user| user.login),
            enterprise_name: self.enterprise.map(|enterprise| enterprise.name),
        })
    }
}

impl IssuesEvent {
    /// Converts the payload into a survey update without a comment.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyDomainError`] when the repository or issue identity
    /// is invalid.
    pub fn into_survey_update(self) -> Result<SurveyUpdate, SurveyDomainError> {
        survey_update(self.issue, &self.repository, self.enterprise, None)
    }
}

impl IssueCommentEvent {
    /// Converts the payload into a survey update carrying the comment text.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyDomainError`] when the repository or issue identity
    /// is invalid.
    pub fn into_survey_update(self) -> Result<SurveyUpdate, SurveyDomainError> {
        survey_update(
            self.issue,
            &self.repository,
            self.enterprise,
            self.comment.body,
        )
    }
}

fn survey_update(
    issue: Issue,
    repository: &Repository,
    enterprise: Option<Enterprise>,
    comment: Option<String>,
) -> Result<SurveyUpdate, SurveyDomainError> {
    let context = SurveyIssueContext {
        enterprise_name: enterprise.map(|value| value.name),
        repository: repository.to_ref()?,
        issue_id: IssueId::new(issue.id)?,
        issue_number: IssueNumber::new(issue.number)?,
        assignee_login: issue.assignee.map(|assignee| assignee.login),
        created_at: issue.created_at,
        updated_at: issue.updated_at,
    };
    Ok(SurveyUpdate {
        context,
        title: issue.title,
        body: issue.body,
        comment,
    })
}
