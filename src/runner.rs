use std::path::Path;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::{error, info};

#[derive(Clone, Debug, PartialEq)]
pub struct CommandOutcome {
    pub command: String,
    pub exit_code: Option<i32>,
    pub stderr: String,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs each planned command as its own `sh -c` subprocess in `workdir`,
/// strictly in order. A failing command is recorded and execution moves on
/// to the next one; nothing is retried.
pub async fn run_commands(workdir: &Path, commands: &[String]) -> Vec<CommandOutcome> {
    let mut outcomes = Vec::new();

    for command in commands {
        info!("running `{command}`");

        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(workdir)
            .output()
            .await;

        let outcome = match output {
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

                if !output.status.success() {
                    error!(
                        "command `{command}` exited with {}: {}",
                        output.status,
                        stderr.trim()
                    );
                }

                CommandOutcome {
                    command: command.clone(),
                    exit_code: output.status.code(),
                    stderr,
                }
            }
            Err(err) => {
                error!("could not spawn `{command}`: {err}");

                CommandOutcome {
                    command: command.clone(),
                    exit_code: None,
                    stderr: err.to_string(),
                }
            }
        };

        outcomes.push(outcome);
    }

    outcomes
}

/// Installs the transform CLI and the `ni` package-manager shims globally,
/// then installs the target project's dependencies with `ni --frozen`. Any
/// failing step is fatal to the run.
pub async fn install_tooling(workdir: &Path) -> Result<()> {
    run_checked(workdir, "npm install -g @hypermod/cli").await?;
    run_checked(workdir, "npm install -g @antfu/ni").await?;
    run_checked(workdir, "ni --frozen").await?;

    Ok(())
}

async fn run_checked(workdir: &Path, command: &str) -> Result<()> {
    info!("running `{command}`");

    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(workdir)
        .output()
        .await
        .with_context(|| format!("could not spawn `{command}`"))?;

    if !output.status.success() {
        bail!(
            "`{command}` exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}
