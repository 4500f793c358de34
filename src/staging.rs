use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::deployment::{classify, Deployment, Operation, Source, Transform};

pub const STAGING_DIR: &str = ".hypermod";

pub fn staging_root(workdir: &Path) -> PathBuf {
    workdir.join(STAGING_DIR)
}

pub fn source_path(workdir: &Path, transform_id: &str, source_name: &str) -> PathBuf {
    staging_root(workdir).join(transform_id).join(source_name)
}

/// Writes every source file of every transform entry to
/// `<workdir>/.hypermod/<transform-id>/<source-name>`, creating intermediate
/// directories as needed. Disk writes only.
pub fn materialize(workdir: &Path, deployment: &Deployment) -> Result<()> {
    for entry in &deployment.transforms {
        if let Operation::Transform(transform) = classify(entry) {
            for source in &transform.sources {
                let path = source_path(workdir, &transform.id, &source.name);

                info!("writing {}", path.display());

                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("could not create `{}`", parent.display()))?;
                }
                fs::write(&path, &source.code)
                    .with_context(|| format!("could not write `{}`", path.display()))?;
            }
        }
    }

    Ok(())
}

/// Picks the source whose base filename is exactly `transform.ts` or
/// `transform.js`. Directory prefixes in the source name are ignored for
/// the match; anything else is not an entry point.
pub fn find_entry_point(transform: &Transform) -> Option<&Source> {
    transform.sources.iter().find(|source| {
        let base = source.name.rsplit('/').next().unwrap_or(&source.name);
        base == "transform.ts" || base == "transform.js"
    })
}

/// Removes the staging root. Called unconditionally after execution so
/// staged sources never show up as working-tree changes.
pub fn cleanup(workdir: &Path) -> Result<()> {
    let root = staging_root(workdir);

    if root.exists() {
        fs::remove_dir_all(&root)
            .with_context(|| format!("could not remove `{}`", root.display()))?;
    }

    Ok(())
}
