//! In-memory issue tracker recording the calls it receives.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::survey::{
    domain::{IssueId, IssueNumber, RepositoryRef},
    ports::{CreatedIssue, IssueTracker, IssueTrackerError, IssueTrackerResult, NewSurveyIssue},
};

/// Issue identifiers handed out by the in-memory tracker start here.
const FIRST_ISSUE_ID: u64 = 1_000;

/// Issue tracker that keeps opened and closed issues in memory.
#[derive(Clone)]
pub struct InMemoryIssueTracker {
    state: Arc<Mutex<TrackerState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug, Default)]
struct TrackerState {
    opened: Vec<(CreatedIssue, NewSurveyIssue)>,
    closed: Vec<(RepositoryRef, IssueNumber)>,
    unavailable: bool,
}

impl InMemoryIssueTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(TrackerState::default())),
            clock: Arc::new(DefaultClock),
        }
    }

    /// Creates a tracker that rejects every request.
    #[must_use]
    pub fn unavailable() -> Self {
        let tracker = Self::new();
        if let Ok(mut state) = tracker.state.lock() {
            state.unavailable = true;
        }
        tracker
    }

    /// Returns the issues opened so far, with their assigned numbers.
    #[must_use]
    pub fn opened(&self) -> Vec<(IssueNumber, NewSurveyIssue)> {
        self.lock()
            .map(|state| {
                state
                    .opened
                    .iter()
                    .map(|(created, issue)| (created.number, issue.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the tracker's view of every issue opened so far.
    #[must_use]
    pub fn created(&self) -> Vec<CreatedIssue> {
        self.lock()
            .map(|state| state.opened.iter().map(|(created, _)| created.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns the issues closed so far.
    #[must_use]
    pub fn closed(&self) -> Vec<(RepositoryRef, IssueNumber)> {
        self.lock().map(|state| state.closed.clone()).unwrap_or_default()
    }

    fn lock(&self) -> IssueTrackerResult<MutexGuard<'_, TrackerState>> {
        self.state
            .lock()
            .map_err(|err| IssueTrackerError::InvalidIssue(err.to_string()))
    }
}

impl Default for InMemoryIssueTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn unavailable_error() -> IssueTrackerError {
    IssueTrackerError::Status {
        status: 503,
        body: "issue tracker unavailable".to_owned(),
    }
}

#[async_trait]
impl IssueTracker for InMemoryIssueTracker {
    async fn create_issue(&self, issue: &NewSurveyIssue) -> IssueTrackerResult<CreatedIssue> {
        let mut state = self.lock()?;
        if state.unavailable {
            return Err(unavailable_error());
        }

        let sequence = u64::try_from(state.opened.len())
            .map_err(|err| IssueTrackerError::InvalidIssue(err.to_string()))?
            + 1;
        let number = IssueNumber::new(sequence)
            .map_err(|err| IssueTrackerError::InvalidIssue(err.to_string()))?;
        let id = IssueId::new(FIRST_ISSUE_ID + sequence)
            .map_err(|err| IssueTrackerError::InvalidIssue(err.to_string()))?;
        let timestamp = self.clock.utc();

        let created = CreatedIssue {
            id,
            number,
            created_at: timestamp,
            updated_at: timestamp,
        };
        state.opened.push((created.clone(), issue.clone()));
        Ok(created)
    }

    async fn close_issue(
        &self,
        repository: &RepositoryRef,
        issue_number: IssueNumber,
    ) -> IssueTrackerResult<()> {
        let mut state = self.lock()?;
        if state.unavailable {
            return Err(unavailable_error());
        }
        state.closed.push((repository.clone(), issue_number));
        Ok(())
    }
}
