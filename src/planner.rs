use std::path::Path;

use tracing::warn;

use crate::actions::resolve_action;
use crate::deployment::{classify, Deployment, Operation};
use crate::staging;

pub const DEFAULT_PARSER: &str = "tsx";

/// Walks deployment entries in order and produces the commands to run.
/// Actions resolve to their command string; transforms resolve to a
/// `hypermod` invocation against their materialized entry point. Entries
/// that resolve to nothing are skipped with a warning, preserving the
/// relative order of everything else.
pub fn plan_commands(workdir: &Path, deployment: &Deployment) -> Vec<String> {
    let mut commands = Vec::new();

    for entry in &deployment.transforms {
        match classify(entry) {
            Operation::Action { action, arguments } => {
                let command = resolve_action(action, arguments);

                if command.is_empty() {
                    continue;
                }

                commands.push(command);
            }
            Operation::Transform(transform) => {
                let entry_point = match staging::find_entry_point(transform) {
                    Some(source) => source,
                    None => {
                        warn!(
                            "no transform file found for transform {}, skipping",
                            transform.id
                        );
                        continue;
                    }
                };

                let entry_file_path =
                    staging::source_path(workdir, &transform.id, &entry_point.name);
                let parser = transform.parser.as_deref().unwrap_or(DEFAULT_PARSER);

                commands.push(format!(
                    "hypermod -t {} --parser {} ./",
                    entry_file_path.display(),
                    parser
                ));
            }
            Operation::Unsupported => {
                warn!("unsupported deployment entry, skipping");
            }
        }
    }

    commands
}
