//! In-memory repository for survey records.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::survey::{
    domain::{IssueId, SurveyRecord, SurveyUpsert, UpsertOutcome},
    ports::{SurveyRepository, SurveyRepositoryError, SurveyRepositoryResult},
};

/// Thread-safe in-memory survey repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveyRepository {
    records: Arc<RwLock<HashMap<IssueId, SurveyRecord>>>,
}

impl InMemorySurveyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn len(&self) -> SurveyRepositoryResult<usize> {
        let records = self.records.read().map_err(|err| {
            SurveyRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(records.len())
    }

    /// Returns `true` when no record is stored.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn is_empty(&self) -> SurveyRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SurveyRepository for InMemorySurveyRepository {
    async fn upsert(&self, upsert: &SurveyUpsert) -> SurveyRepositoryResult<UpsertOutcome> {
        let mut records = self.records.write().map_err(|err| {
            SurveyRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if let Some(existing) = records.get_mut(&upsert.issue_id()) {
            existing.apply(&upsert.answer, upsert.context.updated_at);
            return Ok(UpsertOutcome::Updated);
        }

        records.insert(upsert.issue_id(), SurveyRecord::from_upsert(upsert));
        Ok(UpsertOutcome::Inserted)
    }

    async fn find_by_issue_id(
        &self,
        issue_id: IssueId,
    ) -> SurveyRepositoryResult<Option<SurveyRecord>> {
        let records = self.records.read().map_err(|err| {
            SurveyRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(records.get(&issue_id).cloned())
    }
}
