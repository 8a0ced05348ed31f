use async_trait::async_trait;
use colored::Colorize;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::pr::{PrUrl, PullRequest};

const USER_AGENT: &str = "pr-assign";

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("GitHub token not found in environment")]
    MissingToken,

    #[error("the configuration file was not found: {path}")]
    MissingContent { path: String },
}

/// Where the planned reviewer and assignee lists end up. The live client
/// submits them to GitHub; the dry-run sink prints them instead.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn request_reviewers(&self, pr: &PrUrl, reviewers: &[String])
        -> Result<(), GithubError>;

    async fn add_assignees(&self, pr: &PrUrl, assignees: &[String]) -> Result<(), GithubError>;
}

/// Thin client for the handful of GitHub REST calls this tool needs:
/// PR metadata, repository file content, and the two submission endpoints.
/// Retries, rate limits, and the like are left to the API.
pub struct GithubClient {
    client: reqwest::Client,
    token: String,
}

impl GithubClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
        }
    }

    /// Build a client from the GITHUB_TOKEN env var.
    pub fn from_env() -> Result<Self, GithubError> {
        let token = std::env::var("GITHUB_TOKEN").map_err(|_| GithubError::MissingToken)?;
        Ok(Self::new(token))
    }

    fn repo_url(&self, pr: &PrUrl, tail: &str) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/{}",
            pr.owner, pr.repo, tail
        )
    }

    /// Fetch PR metadata (number, title, author, draft state).
    #[instrument(skip(self, pr_url), fields(owner = %pr_url.owner, repo = %pr_url.repo, pr = pr_url.pr_number))]
    pub async fn fetch_pull_request(&self, pr_url: &PrUrl) -> Result<PullRequest, GithubError> {
        #[derive(serde::Deserialize)]
        struct User {
            login: String,
        }

        #[derive(serde::Deserialize)]
        struct PullResponse {
            number: u64,
            title: String,
            user: User,
            #[serde(default)]
            draft: bool,
        }

        debug!("fetching PR metadata from GitHub API");
        let metadata = self
            .client
            .get(self.repo_url(pr_url, &format!("pulls/{}", pr_url.pr_number)))
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<PullResponse>()
            .await?;
        debug!(title = %metadata.title, author = %metadata.user.login, "received PR metadata");

        Ok(PullRequest {
            number: metadata.number,
            title: metadata.title,
            author: metadata.user.login,
            draft: metadata.draft,
        })
    }

    /// Fetch the raw text of a file in the repository at the given ref.
    /// A missing file is fatal to the run: there is no default-config
    /// fallback.
    #[instrument(skip(self, pr_url), fields(owner = %pr_url.owner, repo = %pr_url.repo))]
    pub async fn fetch_config(
        &self,
        pr_url: &PrUrl,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<String, GithubError> {
        let mut request = self
            .client
            .get(self.repo_url(pr_url, &format!("contents/{}", path)))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github.raw+json")
            .bearer_auth(&self.token);
        if let Some(git_ref) = git_ref {
            request = request.query(&[("ref", git_ref)]);
        }

        debug!("fetching configuration file from GitHub API");
        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GithubError::MissingContent {
                path: path.to_string(),
            });
        }

        let text = response.error_for_status()?.text().await?;
        debug!(config_bytes = text.len(), "received configuration file");
        Ok(text)
    }
}

#[async_trait]
impl SubmissionSink for GithubClient {
    #[instrument(skip(self, pr, reviewers), fields(pr = pr.pr_number, count = reviewers.len()))]
    async fn request_reviewers(
        &self,
        pr: &PrUrl,
        reviewers: &[String],
    ) -> Result<(), GithubError> {
        self.client
            .post(self.repo_url(pr, &format!("pulls/{}/requested_reviewers", pr.pr_number)))
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "reviewers": reviewers }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    #[instrument(skip(self, pr, assignees), fields(pr = pr.pr_number, count = assignees.len()))]
    async fn add_assignees(&self, pr: &PrUrl, assignees: &[String]) -> Result<(), GithubError> {
        self.client
            .post(self.repo_url(pr, &format!("issues/{}/assignees", pr.pr_number)))
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "assignees": assignees }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Sink that prints what would be submitted instead of calling the API.
pub struct DryRunSink;

#[async_trait]
impl SubmissionSink for DryRunSink {
    async fn request_reviewers(
        &self,
        pr: &PrUrl,
        reviewers: &[String],
    ) -> Result<(), GithubError> {
        println!(
            "{} reviewers for PR #{}: {}",
            "would request".yellow(),
            pr.pr_number,
            reviewers.join(", ").bold()
        );
        Ok(())
    }

    async fn add_assignees(&self, pr: &PrUrl, assignees: &[String]) -> Result<(), GithubError> {
        println!(
            "{} assignees for PR #{}: {}",
            "would add".yellow(),
            pr.pr_number,
            assignees.join(", ").bold()
        );
        Ok(())
    }
}
