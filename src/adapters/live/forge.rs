//! Live adapter for the `ForgeClient` port using the GitHub REST API.

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::config::ForgeConfig;
use crate::ports::forge::{BranchOutcome, ForgeClient, TreeFuture, TreeRequest};
use crate::tree::TreeListing;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Live forge client that calls GitHub's git trees endpoint.
pub struct LiveForgeClient {
    client: Client,
    config: ForgeConfig,
}

impl LiveForgeClient {
    /// Creates a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ForgeConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self { client, config })
    }

    /// URL of the recursive tree for one branch.
    ///
    /// Owner, repository and branch are appended as percent-encoded path
    /// segments, so none of them can alter the endpoint or add a query.
    ///
    /// # Errors
    ///
    /// Returns a description if the configured API base is not a usable URL.
    pub fn tree_url(&self, request: &TreeRequest) -> Result<Url, String> {
        let base = &self.config.api_base_url;
        let mut url = Url::parse(base).map_err(|e| format!("invalid API base URL {base:?}: {e}"))?;
        url.path_segments_mut()
            .map_err(|()| format!("API base URL {base:?} cannot take a path"))?
            .pop_if_empty()
            .extend([
                "repos",
                request.owner.as_str(),
                request.repo.as_str(),
                "git",
                "trees",
                request.branch.as_str(),
            ]);
        url.query_pairs_mut().append_pair("recursive", "1");
        Ok(url)
    }
}

/// Maps an HTTP status to an outcome for everything except success.
fn classify_failure(status: StatusCode) -> BranchOutcome {
    match status {
        StatusCode::NOT_FOUND => BranchOutcome::NotFound,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            BranchOutcome::RateLimited { status: status.as_u16() }
        }
        other => BranchOutcome::Failed { reason: format!("unexpected HTTP status {other}") },
    }
}

/// Parses a successful response body.
fn parse_listing(body: &str) -> BranchOutcome {
    match serde_json::from_str::<TreeListing>(body) {
        Ok(listing) => BranchOutcome::Found(listing),
        Err(e) => BranchOutcome::Failed { reason: format!("malformed tree response: {e}") },
    }
}

impl ForgeClient for LiveForgeClient {
    fn fetch_tree(&self, request: &TreeRequest) -> TreeFuture<'_> {
        let url = self.tree_url(request);

        Box::pin(async move {
            let url = match url {
                Ok(url) => url,
                Err(reason) => return BranchOutcome::Failed { reason },
            };
            let mut builder = self
                .client
                .get(url.clone())
                .header(ACCEPT, GITHUB_ACCEPT)
                .header(USER_AGENT, &self.config.user_agent);
            if let Some(token) = &self.config.token {
                builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
            }

            let response = match builder.send().await {
                Ok(response) => response,
                Err(e) => {
                    return BranchOutcome::Failed { reason: format!("request failed: {e}") };
                }
            };

            let status = response.status();
            debug!(%url, status = status.as_u16(), "tree response");
            if !status.is_success() {
                return classify_failure(status);
            }

            match response.text().await {
                Ok(body) => parse_listing(&body),
                Err(e) => BranchOutcome::Failed { reason: format!("failed to read body: {e}") },
            }
        })
    }
}
