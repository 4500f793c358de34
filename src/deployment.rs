use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub id: String,
    #[serde(default)]
    pub parser: Option<String>,
    pub sources: Vec<Source>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionName {
    InstallDependency,
    RemoveDependency,
    UpgradeDependency,
    FileCreate,
    FileDelete,
    FileMove,
    FolderCreate,
    FolderDelete,
    FolderMove,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: ActionName,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgumentKey {
    DependencyName,
    DestinationPath,
    FileContent,
    FilePath,
    FolderPath,
    SourcePath,
    Version,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub key: ArgumentKey,
    pub value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Transform,
    Action,
    #[serde(other)]
    Unknown,
}

/// One entry of a deployment, as delivered on the wire: a kind tag plus
/// possibly-missing payloads. `classify` is the only consumer of the raw
/// shape; everything downstream works on `Operation`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformOnDeployment {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub title: String,
    pub description: String,
    pub transforms: Vec<TransformOnDeployment>,
}

#[derive(Debug, PartialEq)]
pub enum Operation<'a> {
    Transform(&'a Transform),
    Action {
        action: &'a Action,
        arguments: &'a [Argument],
    },
    Unsupported,
}

/// Tags a deployment entry as a runnable transform, a runnable action, or
/// unsupported. A kind tag without its matching payload is unsupported, not
/// an error.
pub fn classify(entry: &TransformOnDeployment) -> Operation<'_> {
    match entry.kind {
        EntryKind::Transform => match &entry.transform {
            Some(transform) => Operation::Transform(transform),
            None => Operation::Unsupported,
        },
        EntryKind::Action => match &entry.action {
            Some(action) => Operation::Action {
                action,
                arguments: &entry.arguments,
            },
            None => Operation::Unsupported,
        },
        EntryKind::Unknown => Operation::Unsupported,
    }
}
