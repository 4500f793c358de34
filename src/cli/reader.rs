use anyhow::Result;
use serde::Deserialize;
use serde_yaml;

use super::common::{DeploymentRef, Repository};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Config {
    pub version: String,
    pub deployment: DeploymentRef,
    pub repo: Repository,
    pub git_ref: String,
    pub sha: String,
    pub token: Option<String>,
    pub workdir: Option<String>,
    pub install_tools: Option<bool>,
    pub api_base: Option<String>,
    pub github_api_base: Option<String>,
}

pub fn read_config(config: &str) -> Result<Config> {
    let deserialized_config: Config = serde_yaml::from_str(config)?;

    Ok(deserialized_config)
}
