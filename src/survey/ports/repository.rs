//! Repository port for survey record persistence.

use crate::survey::domain::{IssueId, SurveyRecord, SurveyUpsert, UpsertOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for survey repository operations.
pub type SurveyRepositoryResult<T> = Result<T, SurveyRepositoryError>;

/// Survey record persistence contract.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Inserts the record for the upsert's issue, or updates the existing
    /// one in place.
    ///
    /// Updates overwrite the pull request number, answer fields and
    /// `updated_at`; the creation context of an existing record is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyRepositoryError::Persistence`] when the store cannot
    /// be reached or rejects the write.
    async fn upsert(&self, upsert: &SurveyUpsert) -> SurveyRepositoryResult<UpsertOutcome>;

    /// Finds the record for a survey issue.
    ///
    /// Returns `None` when nothing has been recorded for the issue.
    async fn find_by_issue_id(
        &self,
        issue_id: IssueId,
    ) -> SurveyRepositoryResult<Option<SurveyRecord>>;
}

/// Errors returned by survey repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SurveyRepositoryError {
    /// A stored row could not be mapped back into a record.
    #[error("corrupt survey record {issue_id}: {reason}")]
    CorruptRecord {
        /// Key of the offending row.
        issue_id: i64,
        /// Mapping failure description.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SurveyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
