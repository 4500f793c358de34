use std::path::PathBuf;

use anyhow::{bail, Result};
use regex::Regex;

use super::common::{DeploymentRef, Repository};
use super::reader;

#[derive(Clone, Debug)]
pub struct ParsedConfig {
    pub version: String,
    pub deployment: DeploymentRef,
    pub repo: Repository,
    pub base_branch: String,
    pub sha: String,
    pub token: String,
    pub workdir: PathBuf,
    pub install_tools: bool,
    pub api_base: Option<String>,
    pub github_api_base: Option<String>,
}

pub fn parse_config(config: reader::Config, fallback_token: Option<String>) -> Result<ParsedConfig> {
    let token = match config.token.filter(|token| !token.is_empty()) {
        Some(token) => token,
        None => match fallback_token.filter(|token| !token.is_empty()) {
            Some(token) => token,
            None => bail!(
                "missing GitHub token: set `token` in the config file or the GITHUB_TOKEN environment variable"
            ),
        },
    };

    let base_branch = parse_base_branch(&config.git_ref)?;

    Ok(ParsedConfig {
        version: config.version,
        deployment: config.deployment,
        repo: config.repo,
        base_branch,
        sha: config.sha,
        token,
        workdir: PathBuf::from(config.workdir.unwrap_or_else(|| ".".to_string())),
        install_tools: config.install_tools.unwrap_or(true),
        api_base: config.api_base,
        github_api_base: config.github_api_base,
    })
}

/// Derives the pull-request base branch from the triggering ref. A
/// `refs/heads/` prefix is stripped; a bare branch name passes through;
/// any other `refs/` form cannot serve as a base branch.
fn parse_base_branch(git_ref: &str) -> Result<String> {
    let re = Regex::new("^refs/heads/(.+)$").unwrap();

    if let Some(captures) = re.captures(git_ref) {
        return Ok(captures[1].to_string());
    }

    if git_ref.starts_with("refs/") {
        bail!("ref `{git_ref}` does not name a branch");
    }

    if git_ref.is_empty() {
        bail!("`git_ref` must not be empty");
    }

    Ok(git_ref.to_string())
}
