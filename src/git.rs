use std::path::Path;
use std::process::Output;

use anyhow::{bail, Context, Result};
use tokio::process::Command;

async fn git(workdir: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .args(args)
        .current_dir(workdir)
        .output()
        .await
        .with_context(|| format!("could not spawn `git {}`", args.join(" ")))
}

fn ensure_success(output: &Output, what: &str) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    bail!(
        "{what} failed: {}",
        String::from_utf8_lossy(&output.stderr).trim()
    );
}

pub async fn setup_user(workdir: &Path) -> Result<()> {
    let name = git(workdir, &["config", "user.name", "github-actions[bot]"]).await?;
    ensure_success(&name, "configuring git user name")?;

    let email = git(
        workdir,
        &[
            "config",
            "user.email",
            "github-actions[bot]@users.noreply.github.com",
        ],
    )
    .await?;
    ensure_success(&email, "configuring git user email")
}

/// Checks the branch out if it exists, otherwise creates it from the
/// current position.
pub async fn switch_to_maybe_existing_branch(workdir: &Path, branch: &str) -> Result<()> {
    let checkout = git(workdir, &["checkout", branch]).await?;

    if checkout.status.success() {
        return Ok(());
    }

    let create = git(workdir, &["checkout", "-b", branch]).await?;
    ensure_success(&create, "creating branch")
}

pub async fn reset_hard(workdir: &Path, git_ref: &str) -> Result<()> {
    let reset = git(workdir, &["reset", "--hard", git_ref]).await?;
    ensure_success(&reset, "resetting branch")
}

pub async fn commit_all(workdir: &Path, message: &str) -> Result<()> {
    let add = git(workdir, &["add", "."]).await?;
    ensure_success(&add, "staging changes")?;

    let commit = git(workdir, &["commit", "-m", message]).await?;
    ensure_success(&commit, "committing changes")
}

pub async fn push_force(workdir: &Path, branch: &str) -> Result<()> {
    let head_ref = format!("HEAD:{branch}");
    let push = git(workdir, &["push", "origin", &head_ref, "--force"]).await?;
    ensure_success(&push, "pushing branch")
}

/// Porcelain status of the working tree. Empty means no changes.
pub async fn diff_status(workdir: &Path) -> Result<String> {
    let status = git(workdir, &["status", "--porcelain"]).await?;
    ensure_success(&status, "reading working tree status")?;

    Ok(String::from_utf8_lossy(&status.stdout).trim().to_string())
}
