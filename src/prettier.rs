use std::path::Path;

use anyhow::{bail, Context, Result};
use tokio::process::Command;

const FORMAT_PIPELINE: &str = r#"git status --porcelain | awk '{print substr($0, 4)}' | grep -E '\.(ts|tsx|js|jsx)$' | xargs -r npx prettier --write"#;

/// Formats the changed JavaScript/TypeScript files in the working tree.
pub async fn format_changed_files(workdir: &Path) -> Result<()> {
    let output = Command::new("bash")
        .arg("-c")
        .arg(FORMAT_PIPELINE)
        .current_dir(workdir)
        .output()
        .await
        .context("could not spawn the formatter pipeline")?;

    if !output.status.success() {
        bail!(
            "formatter exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}
