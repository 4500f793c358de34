use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cli::{ParsedConfig, Repository};
use crate::deployment::Deployment;

pub const MAX_RATE_LIMIT_RETRIES: u32 = 2;

const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
pub struct SearchResults {
    pub items: Vec<FoundPullRequest>,
}

#[derive(Debug, Deserialize)]
pub struct FoundPullRequest {
    pub number: u64,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestResponse {
    pub number: u64,
}

#[derive(Serialize)]
struct CreatePullRequestBody<'a> {
    title: &'a str,
    body: &'a str,
    head: &'a str,
    base: &'a str,
}

#[derive(Serialize)]
struct UpdatePullRequestBody<'a> {
    title: &'a str,
    body: &'a str,
}

#[async_trait]
pub trait PullRequestService<T> {
    fn configure_provider(&self, base_url: Option<String>) -> Result<T>;

    async fn search_open_pull_request(
        &self,
        instance: T,
        head_branch: &str,
        base_branch: &str,
    ) -> Result<Option<u64>>;

    async fn create_pull_request(
        &self,
        instance: T,
        head_branch: &str,
        base_branch: &str,
        deployment: &Deployment,
    ) -> Result<u64>;

    async fn update_pull_request(
        &self,
        instance: T,
        number: u64,
        deployment: &Deployment,
    ) -> Result<u64>;
}

pub struct GithubProvider {
    pub config: ParsedConfig,
    pub retry_delay: Duration,
}

impl GithubProvider {
    pub fn new(config: ParsedConfig) -> Self {
        Self {
            config,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

#[async_trait]
impl PullRequestService<Arc<Octocrab>> for GithubProvider {
    fn configure_provider(&self, base_url: Option<String>) -> Result<Arc<Octocrab>> {
        let builder = Octocrab::builder().personal_token(self.config.token.clone());

        let instance = match base_url {
            Some(url) => Arc::new(builder.base_url(url)?.build()?),
            None => octocrab::initialise(builder)?,
        };

        Ok(instance)
    }

    async fn search_open_pull_request(
        &self,
        instance: Arc<Octocrab>,
        head_branch: &str,
        base_branch: &str,
    ) -> Result<Option<u64>> {
        let query = build_search_query(&self.config.repo, head_branch, base_branch);
        let parameters = [("q", query.as_str())];

        let results: SearchResults =
            with_rate_limit_retry("pull request search", self.retry_delay, || {
                instance.get("search/issues", Some(&parameters))
            })
            .await
            .context("searching for an existing pull request")?;

        Ok(results.items.first().map(|pull_request| pull_request.number))
    }

    async fn create_pull_request(
        &self,
        instance: Arc<Octocrab>,
        head_branch: &str,
        base_branch: &str,
        deployment: &Deployment,
    ) -> Result<u64> {
        let route = format!("repos/{}/pulls", self.config.repo.full_name());
        let body = CreatePullRequestBody {
            title: &deployment.title,
            body: &deployment.description,
            head: head_branch,
            base: base_branch,
        };

        let response: PullRequestResponse =
            with_rate_limit_retry("pull request creation", self.retry_delay, || {
                instance.post(route.as_str(), Some(&body))
            })
            .await
            .context("creating the pull request")?;

        info!("created pull request #{}", response.number);

        Ok(response.number)
    }

    async fn update_pull_request(
        &self,
        instance: Arc<Octocrab>,
        number: u64,
        deployment: &Deployment,
    ) -> Result<u64> {
        let route = format!("repos/{}/pulls/{number}", self.config.repo.full_name());
        let body = UpdatePullRequestBody {
            title: &deployment.title,
            body: &deployment.description,
        };

        let response: PullRequestResponse =
            with_rate_limit_retry("pull request update", self.retry_delay, || {
                instance.patch(route.as_str(), Some(&body))
            })
            .await
            .context("updating the pull request")?;

        info!("updated pull request #{}", response.number);

        Ok(response.number)
    }
}

pub fn build_search_query(repo: &Repository, head_branch: &str, base_branch: &str) -> String {
    format!(
        "repo:{} state:open head:{head_branch} base:{base_branch} is:pull-request",
        repo.full_name()
    )
}

fn is_rate_limit(error: &octocrab::Error) -> bool {
    match error {
        octocrab::Error::GitHub { source, .. } => {
            source.message.to_lowercase().contains("rate limit")
        }
        _ => false,
    }
}

/// Retries `call` on primary or secondary rate-limit responses, up to
/// `MAX_RATE_LIMIT_RETRIES` times with `retry_delay` between attempts.
/// One more rate-limit response after that surfaces to the caller.
async fn with_rate_limit_retry<T, F, Fut>(
    operation: &str,
    retry_delay: Duration,
    call: F,
) -> Result<T, octocrab::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, octocrab::Error>>,
{
    let mut attempt = 0;

    loop {
        match call().await {
            Err(error) if is_rate_limit(&error) => {
                if attempt >= MAX_RATE_LIMIT_RETRIES {
                    return Err(error);
                }

                attempt += 1;
                warn!(
                    "request quota exhausted for {operation}, retrying in {:?} ({attempt}/{MAX_RATE_LIMIT_RETRIES})",
                    retry_delay
                );
                tokio::time::sleep(retry_delay).await;
            }
            result => return result,
        }
    }
}
