//! Issue tracker backed by the GitHub REST API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::survey::{
    domain::{IssueId, IssueNumber, RepositoryRef},
    ports::{CreatedIssue, IssueTracker, IssueTrackerError, IssueTrackerResult, NewSurveyIssue},
};

/// Public GitHub API base URL.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub issue tracker authenticated with an installation or personal token.
#[derive(Clone)]
pub struct GitHubIssueTracker {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubIssueTracker {
    /// Creates a tracker reusing an existing [`reqwest::Client`].
    ///
    /// * `api_url` - API base URL, normally [`DEFAULT_GITHUB_API_URL`].
    /// * `token` - Bearer token with issue write access.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        }
    }

    fn issues_url(&self, repository: &RepositoryRef) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_url,
            repository.owner(),
            repository.name()
        )
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(API_VERSION_HEADER, API_VERSION)
    }

    async fn ensure_success(response: reqwest::Response) -> IssueTrackerResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_owned());
            return Err(IssueTrackerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl std::fmt::Debug for GitHubIssueTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubIssueTracker")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IssueTracker for GitHubIssueTracker {
    async fn create_issue(&self, issue: &NewSurveyIssue) -> IssueTrackerResult<CreatedIssue> {
        let response = self
            .request(reqwest::Method::POST, self.issues_url(&issue.repository))
            .json(&CreateIssueRequest::from(issue))
            .send()
            .await?;

        Self::ensure_success(response)
            .await?
            .json::<IssueResponse>()
            .await?
            .try_into()
    }

    async fn close_issue(
        &self,
        repository: &RepositoryRef,
        issue_number: IssueNumber,
    ) -> IssueTrackerResult<()> {
        let url = format!("{}/{issue_number}", self.issues_url(repository));
        let response = self
            .request(reqwest::Method::PATCH, url)
            .json(&CloseIssueRequest { state: "closed" })
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    assignees: Vec<&'a str>,
}

impl<'a> From<&'a NewSurveyIssue> for CreateIssueRequest<'a> {
    fn from(issue: &'a NewSurveyIssue) -> Self {
        Self {
            title: &issue.title,
            body: &issue.body,
            assignees: issue.assignee.as_deref().into_iter().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CloseIssueRequest {
    state: &'static str,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    id: u64,
    number: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IssueResponse> for CreatedIssue {
    type Error = IssueTrackerError;

    fn try_from(response: IssueResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IssueId::new(response.id)
                .map_err(|err| IssueTrackerError::InvalidIssue(err.to_string()))?,
            number: IssueNumber::new(response.number)
                .map_err(|err| IssueTrackerError::InvalidIssue(err.to_string()))?,
            created_at: response.created_at,
            updated_at: response.updated_at,
        })
    }
}
