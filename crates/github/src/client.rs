//! REST client for the two issue writes the relay performs.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::{debug, instrument};

use triage::{
    AnnotatorError, ApiCredential, IssueNumber, IssueWriter, RepositoryId, WriteOperation,
    WriteReceipt,
};

/// Default GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// `User-Agent` sent with every request (GitHub rejects requests without one).
pub const USER_AGENT: &str = "triage-relay";

#[derive(Debug, Serialize)]
struct AddLabelsRequest<'a> {
    labels: &'a [String],
}

#[derive(Debug, Serialize)]
struct CreateCommentRequest<'a> {
    body: &'a str,
}

/// GitHub issues client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    token: ApiCredential,
    api_base: String,
}

impl GithubClient {
    /// Creates a client against the public GitHub API.
    pub fn new(token: ApiCredential) -> Self {
        Self {
            client: Client::new(),
            token,
            api_base: GITHUB_API_URL.to_string(),
        }
    }

    /// Sets a custom API base URL (GitHub Enterprise or a test server).
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reuses an existing HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn issue_url(&self, repository: &RepositoryId, issue: IssueNumber, leaf: &str) -> String {
        format!(
            "{}/repos/{}/issues/{}/{}",
            self.api_base, repository, issue, leaf
        )
    }

    fn post(&self, url: String) -> RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(self.token.expose())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        operation: WriteOperation,
        issue: IssueNumber,
    ) -> Result<WriteReceipt, AnnotatorError> {
        let response = request
            .send()
            .await
            .map_err(|e| AnnotatorError::Transport {
                operation,
                issue,
                message: e.to_string(),
            })?;

        let receipt = WriteReceipt {
            status: response.status().as_u16(),
        };
        debug!(%operation, status = receipt.status, "GitHub write completed");
        Ok(receipt)
    }
}

#[async_trait]
impl IssueWriter for GithubClient {
    #[instrument(skip_all, fields(repository = %repository, issue = %issue))]
    async fn add_labels(
        &self,
        repository: &RepositoryId,
        issue: IssueNumber,
        labels: &[String],
    ) -> Result<WriteReceipt, AnnotatorError> {
        let request = self
            .post(self.issue_url(repository, issue, "labels"))
            .json(&AddLabelsRequest { labels });
        self.send(request, WriteOperation::AddLabels, issue).await
    }

    #[instrument(skip_all, fields(repository = %repository, issue = %issue))]
    async fn create_comment(
        &self,
        repository: &RepositoryId,
        issue: IssueNumber,
        body: &str,
    ) -> Result<WriteReceipt, AnnotatorError> {
        let request = self
            .post(self.issue_url(repository, issue, "comments"))
            .json(&CreateCommentRequest { body });
        self.send(request, WriteOperation::CreateComment, issue).await
    }
}
