//! Identifier and validated scalar types for the survey domain.

use super::SurveyDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest value representable in the `BIGINT` columns of `survey_results`.
const MAX_PERSISTED_VALUE: u64 = i64::MAX as u64;

/// Platform-assigned identifier of a survey issue.
///
/// Unlike the issue number this value is unique across repositories and is
/// the key of the survey record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(u64);

impl IssueId {
    /// Creates a validated issue identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyDomainError::InvalidIssueId`] when the value is zero or
    /// exceeds `i64::MAX`.
    pub const fn new(value: u64) -> Result<Self, SurveyDomainError> {
        if value == 0 || value > MAX_PERSISTED_VALUE {
            return Err(SurveyDomainError::InvalidIssueId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive issue number within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a validated issue number.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyDomainError::InvalidIssueNumber`] when the value is zero
    /// or exceeds `i64::MAX`.
    pub const fn new(value: u64) -> Result<Self, SurveyDomainError> {
        if value == 0 || value > MAX_PERSISTED_VALUE {
            return Err(SurveyDomainError::InvalidIssueNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive pull request number within a repository.
///
/// # Examples
///
///     use copilot_survey::survey::domain::PullRequestNumber;
///
///     let pr_number = PullRequestNumber::new(42).expect("valid");
///     assert_eq!(pr_number.reference(), "#42");
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Creates a validated pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyDomainError::InvalidPullRequestNumber`] when the value
    /// is zero or exceeds `i64::MAX`.
    pub const fn new(value: u64) -> Result<Self, SurveyDomainError> {
        if value == 0 || value > MAX_PERSISTED_VALUE {
            return Err(SurveyDomainError::InvalidPullRequestNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the markdown cross-reference, e.g. `#42`.
    #[must_use]
    pub fn reference(self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repository addressed by owner login and repository name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    /// Creates a validated repository reference.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyDomainError::InvalidRepository`] when either segment is
    /// empty after trimming or contains a slash.
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, SurveyDomainError> {
        let raw_owner = owner.into();
        let raw_name = name.into();
        let normalized_owner = raw_owner.trim();
        let normalized_name = raw_name.trim();
        let is_valid = !normalized_owner.is_empty()
            && !normalized_name.is_empty()
            && !normalized_owner.contains('/')
            && !normalized_name.contains('/');

        if !is_valid {
            return Err(SurveyDomainError::InvalidRepository {
                owner: raw_owner,
                name: raw_name,
            });
        }

        Ok(Self {
            owner: normalized_owner.to_owned(),
            name: normalized_name.to_owned(),
        })
    }

    /// Returns the owner login.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
