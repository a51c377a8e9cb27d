//! Survey record aggregate and the values used to write it.

use super::{
    IssueId, IssueNumber, PullRequestNumber, RepositoryRef, SurveyResponse, UsagePercentage,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue-level context captured from the event that writes a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyIssueContext {
    /// Enterprise owning the repository, when the event carries one.
    pub enterprise_name: Option<String>,
    /// Repository the survey issue lives in.
    pub repository: RepositoryRef,
    /// Platform-assigned survey issue identifier.
    pub issue_id: IssueId,
    /// Survey issue number.
    pub issue_number: IssueNumber,
    /// Login of the survey assignee.
    pub assignee_login: Option<String>,
    /// Survey issue creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Survey issue last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Answer fields written on every upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAnswer {
    /// Pull request the survey is about.
    pub pr_number: PullRequestNumber,
    /// Whether the assistant was used; `None` until determined.
    pub assistant_used: Option<bool>,
    /// Selected usage buckets for affirmative answers.
    pub usage_percentage: Option<UsagePercentage>,
    /// Comment explaining the answer.
    pub non_use_reason: Option<String>,
}

impl SurveyAnswer {
    /// Answer for a survey that has just been opened.
    #[must_use]
    pub const fn pending(pr_number: PullRequestNumber) -> Self {
        Self {
            pr_number,
            assistant_used: None,
            usage_percentage: None,
            non_use_reason: None,
        }
    }

    /// Answer derived from a parsed survey response.
    #[must_use]
    pub fn from_response(pr_number: PullRequestNumber, response: &SurveyResponse) -> Self {
        Self {
            pr_number,
            assistant_used: Some(response.assistant_used()),
            usage_percentage: response.usage_percentage().cloned(),
            non_use_reason: response.non_use_reason().map(str::to_owned),
        }
    }

    /// Answer for a comment on a survey where nothing is ticked yet.
    #[must_use]
    pub fn comment_only(pr_number: PullRequestNumber, comment: impl Into<String>) -> Self {
        Self {
            pr_number,
            assistant_used: None,
            usage_percentage: None,
            non_use_reason: Some(comment.into()),
        }
    }
}

/// Input of a survey record upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyUpsert {
    /// Issue context, used in full only when inserting.
    pub context: SurveyIssueContext,
    /// Latest answer values.
    pub answer: SurveyAnswer,
}

impl SurveyUpsert {
    /// Creates an upsert from its parts.
    #[must_use]
    pub const fn new(context: SurveyIssueContext, answer: SurveyAnswer) -> Self {
        Self { context, answer }
    }

    /// Returns the record key.
    #[must_use]
    pub const fn issue_id(&self) -> IssueId {
        self.context.issue_id
    }
}

/// Result of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// No record existed; one was created.
    Inserted,
    /// The existing record was updated in place.
    Updated,
}

/// One persisted survey result, keyed by issue identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRecord {
    /// Survey issue identifier.
    pub issue_id: IssueId,
    /// Enterprise name at creation time.
    pub enterprise_name: Option<String>,
    /// Repository owner login.
    pub owner_login: String,
    /// Repository name.
    pub repo_name: String,
    /// Survey issue number.
    pub issue_number: IssueNumber,
    /// Surveyed pull request number.
    pub pr_number: PullRequestNumber,
    /// Survey assignee login.
    pub assignee_login: Option<String>,
    /// Whether the assistant was used; `None` until determined.
    pub assistant_used: Option<bool>,
    /// Selected usage buckets.
    pub usage_percentage: Option<UsagePercentage>,
    /// Reason given for not using the assistant.
    pub non_use_reason: Option<String>,
    /// Survey issue creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the latest recorded answer.
    pub updated_at: DateTime<Utc>,
}

impl SurveyRecord {
    /// Builds a new record from an upsert.
    #[must_use]
    pub fn from_upsert(upsert: &SurveyUpsert) -> Self {
        let SurveyUpsert { context, answer } = upsert;
        Self {
            issue_id: context.issue_id,
            enterprise_name: context.enterprise_name.clone(),
            owner_login: context.repository.owner().to_owned(),
            repo_name: context.repository.name().to_owned(),
            issue_number: context.issue_number,
            pr_number: answer.pr_number,
            assignee_login: context.assignee_login.clone(),
            assistant_used: answer.assistant_used,
            usage_percentage: answer.usage_percentage.clone(),
            non_use_reason: answer.non_use_reason.clone(),
            created_at: context.created_at,
            updated_at: context.updated_at,
        }
    }

    /// Overwrites the answer fields with the latest values.
    ///
    /// Creation context (repository, assignee, creation time) is immutable.
    pub fn apply(&mut self, answer: &SurveyAnswer, updated_at: DateTime<Utc>) {
        self.pr_number = answer.pr_number;
        self.assistant_used = answer.assistant_used;
        self.usage_percentage.clone_from(&answer.usage_percentage);
        self.non_use_reason.clone_from(&answer.non_use_reason);
        self.updated_at = updated_at;
    }
}
