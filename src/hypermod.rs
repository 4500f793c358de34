use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing::info;

use crate::cli::ParsedConfig;
use crate::deployment::Deployment;

pub const DEFAULT_API_BASE: &str = "https://www.hypermod.io";

/// Client for the deployment source endpoints.
pub struct HypermodClient {
    client: reqwest::Client,
    base_url: String,
}

impl HypermodClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    fn deployment_url(&self, config: &ParsedConfig) -> String {
        format!(
            "{}/api/action/{}/{}/deployment/{}",
            self.base_url,
            config.deployment.id,
            config.deployment.key,
            config.repo.full_name()
        )
    }

    pub async fn fetch_deployment(&self, config: &ParsedConfig) -> Result<Deployment> {
        info!("fetching deployment {}", config.deployment.id);

        let response = self
            .client
            .get(self.deployment_url(config))
            .send()
            .await
            .context("could not reach the deployment service")?;

        if !response.status().is_success() {
            bail!(
                "deployment not found or invalid, status: {}",
                response.status()
            );
        }

        let deployment = response
            .json::<Deployment>()
            .await
            .context("could not decode the deployment payload")?;

        Ok(deployment)
    }

    /// Reports the resulting pull-request number back to the deployment
    /// service for cross-run tracking.
    pub async fn report_result(&self, config: &ParsedConfig, pull_request_number: u64) -> Result<()> {
        let response = self
            .client
            .post(self.deployment_url(config))
            .json(&json!({ "pullRequestNumber": pull_request_number }))
            .send()
            .await
            .context("could not reach the deployment service")?;

        if !response.status().is_success() {
            bail!("deployment service answered {}", response.status());
        }

        Ok(())
    }
}
