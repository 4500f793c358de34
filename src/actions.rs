use std::collections::HashMap;

use tracing::warn;

use crate::deployment::{Action, ActionName, Argument, ArgumentKey};

/// Resolves a repository action plus its keyed arguments into a single
/// shell command string. Pure string synthesis; an unknown action name
/// resolves to an empty command. Duplicate argument keys keep the last
/// occurrence; a missing optional version omits the `@<version>` suffix.
pub fn resolve_action(action: &Action, arguments: &[Argument]) -> String {
    let args: HashMap<ArgumentKey, &str> = arguments
        .iter()
        .map(|argument| (argument.key, argument.value.as_str()))
        .collect();

    let arg = |key: ArgumentKey| args.get(&key).copied().unwrap_or("");
    let versioned = |name: &str| {
        let version = arg(ArgumentKey::Version);
        if version.is_empty() {
            name.to_string()
        } else {
            format!("{name}@{version}")
        }
    };

    match action.name {
        ActionName::InstallDependency => {
            format!("ni {}", versioned(arg(ArgumentKey::DependencyName)))
                .trim_end()
                .to_string()
        }
        ActionName::RemoveDependency => format!("nun {}", arg(ArgumentKey::DependencyName))
            .trim_end()
            .to_string(),
        ActionName::UpgradeDependency => {
            format!("nup {}", versioned(arg(ArgumentKey::DependencyName)))
                .trim_end()
                .to_string()
        }
        ActionName::FileCreate => format!(
            "echo \"{}\" > {}",
            arg(ArgumentKey::FileContent),
            arg(ArgumentKey::FilePath)
        ),
        ActionName::FileDelete => format!("rm {}", arg(ArgumentKey::FilePath)),
        ActionName::FileMove => format!(
            "mv {} {}",
            arg(ArgumentKey::SourcePath),
            arg(ArgumentKey::DestinationPath)
        ),
        ActionName::FolderCreate => format!("mkdir -p {}", arg(ArgumentKey::FolderPath)),
        ActionName::FolderDelete => format!("rm -rf {}", arg(ArgumentKey::FolderPath)),
        ActionName::FolderMove => format!(
            "mv {} {}",
            arg(ArgumentKey::SourcePath),
            arg(ArgumentKey::DestinationPath)
        ),
        ActionName::Unknown => {
            warn!("unknown action, skipping");
            String::new()
        }
    }
}
