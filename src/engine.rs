use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::ParsedConfig;
use crate::deployment::Deployment;
use crate::git;
use crate::github::{GithubProvider, PullRequestService};
use crate::hypermod::HypermodClient;
use crate::planner;
use crate::prettier;
use crate::runner::{self, CommandOutcome};
use crate::staging;

pub const BRANCH_PREFIX: &str = "hypermod-transform";

#[derive(Debug, PartialEq)]
pub enum Outcome {
    PullRequest(u64),
    NoChanges,
}

#[derive(Debug)]
pub struct RunReport {
    pub outcome: Outcome,
    pub failures: Vec<CommandOutcome>,
}

/// Runs one deployment end to end: fetch, branch preparation, command
/// execution, change detection, and pull-request reconciliation. Safe to
/// re-run: the branch is rebuilt from the triggering commit every time and
/// the run converges onto a single open pull request.
pub async fn call(config: ParsedConfig) -> Result<RunReport> {
    let source = HypermodClient::new(config.api_base.clone());
    let deployment = source.fetch_deployment(&config).await?;

    info!("running deployment {} ({})", deployment.id, deployment.title);

    git::setup_user(&config.workdir).await?;

    if config.install_tools {
        runner::install_tooling(&config.workdir).await?;
    }

    let branch_name = format!("{BRANCH_PREFIX}/{}", config.deployment.id);

    info!("preparing fresh branch {branch_name}");
    git::switch_to_maybe_existing_branch(&config.workdir, &branch_name).await?;
    git::reset_hard(&config.workdir, &config.sha).await?;

    let executed = execute_deployment(&config, &deployment).await;

    // Staged transform sources must never survive the run, or count as a
    // working-tree change below.
    if let Err(error) = staging::cleanup(&config.workdir) {
        warn!("could not remove the staging directory: {error:#}");
    }

    let outcomes = executed?;
    let failures: Vec<CommandOutcome> = outcomes
        .into_iter()
        .filter(|outcome| !outcome.success())
        .collect();

    let diffs = git::diff_status(&config.workdir).await?;

    if diffs.is_empty() {
        warn!("no changes detected");
        return Ok(RunReport {
            outcome: Outcome::NoChanges,
            failures,
        });
    }

    info!("writing altered files to pull request\n{diffs}");

    if let Err(error) = prettier::format_changed_files(&config.workdir).await {
        warn!("skipping source formatting: {error:#}");
    }

    git::commit_all(&config.workdir, &format!("@hypermod {}", deployment.title)).await?;

    let provider = GithubProvider::new(config.clone());
    let instance = provider.configure_provider(config.github_api_base.clone())?;

    let pull_request_number =
        reconcile_pull_request(&config, &provider, instance, &branch_name, &deployment).await?;

    if let Err(error) = source.report_result(&config, pull_request_number).await {
        warn!("could not report pull request #{pull_request_number} to the deployment service: {error:#}");
    }

    Ok(RunReport {
        outcome: Outcome::PullRequest(pull_request_number),
        failures,
    })
}

async fn execute_deployment(
    config: &ParsedConfig,
    deployment: &Deployment,
) -> Result<Vec<CommandOutcome>> {
    staging::materialize(&config.workdir, deployment)?;

    let commands = planner::plan_commands(&config.workdir, deployment);

    Ok(runner::run_commands(&config.workdir, &commands).await)
}

/// Converges the remote state onto exactly one open pull request for the
/// deployment branch. The search for an existing pull request and the force
/// push are independent, so they run concurrently; both finish before the
/// create/update decision.
async fn reconcile_pull_request(
    config: &ParsedConfig,
    provider: &GithubProvider,
    instance: Arc<octocrab::Octocrab>,
    branch_name: &str,
    deployment: &Deployment,
) -> Result<u64> {
    let (existing, pushed) = futures::join!(
        provider.search_open_pull_request(instance.clone(), branch_name, &config.base_branch),
        git::push_force(&config.workdir, branch_name)
    );

    pushed?;

    let pull_request_number = match existing? {
        Some(number) => {
            info!("updating found pull request #{number}");
            provider
                .update_pull_request(instance, number, deployment)
                .await?
        }
        None => {
            info!("creating pull request");
            provider
                .create_pull_request(instance, branch_name, &config.base_branch, deployment)
                .await?
        }
    };

    Ok(pull_request_number)
}
