use crate::deployment::{
    Action, ActionName, Argument, ArgumentKey, Deployment, EntryKind, Source, Transform,
    TransformOnDeployment,
};

pub fn create_source(name: &str, code: &str) -> Source {
    Source {
        id: format!("src-{name}"),
        name: name.to_string(),
        code: code.to_string(),
    }
}

pub fn create_transform(id: &str, parser: Option<&str>, sources: Vec<Source>) -> Transform {
    Transform {
        id: id.to_string(),
        parser: parser.map(|parser| parser.to_string()),
        sources,
    }
}

pub fn create_action(name: ActionName) -> Action {
    Action { name }
}

pub fn create_argument(key: ArgumentKey, value: &str) -> Argument {
    Argument {
        key,
        value: value.to_string(),
    }
}

pub fn create_transform_entry(transform: Transform) -> TransformOnDeployment {
    TransformOnDeployment {
        kind: EntryKind::Transform,
        transform: Some(transform),
        action: None,
        arguments: vec![],
    }
}

pub fn create_action_entry(name: ActionName, arguments: Vec<Argument>) -> TransformOnDeployment {
    TransformOnDeployment {
        kind: EntryKind::Action,
        transform: None,
        action: Some(create_action(name)),
        arguments,
    }
}

pub fn create_deployment(
    id: &str,
    title: &str,
    description: &str,
    transforms: Vec<TransformOnDeployment>,
) -> Deployment {
    Deployment {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        transforms,
    }
}
