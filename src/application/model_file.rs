use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::domain::{
    context::ContextObject,
    error::ModelError,
    model::{MethodDescriptor, OperationGroup, ServiceDefinition, ServiceModel},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelDocument {
    name: String,
    #[serde(default)]
    context: ContextObject,
    #[serde(default)]
    methods: Vec<MethodDescriptor>,
    #[serde(default)]
    groups: Vec<OperationGroup>,
}

/// Service model read from a JSON or TOML description on disk.
#[derive(Debug, Clone)]
pub struct ModelFile {
    path: PathBuf,
}

impl ModelFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ServiceModel for ModelFile {
    fn instantiate(&self) -> Result<ServiceDefinition, ModelError> {
        let text = fs::read_to_string(&self.path).map_err(|error| ModelError::Read {
            path: self.path.display().to_string(),
            message: error.to_string(),
        })?;
        parse_model(&self.path, &text)
    }
}

/// Parses by extension: `.json` as JSON, anything else as TOML.
pub fn parse_model(path: &Path, text: &str) -> Result<ServiceDefinition, ModelError> {
    let is_json = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

    let document: ModelDocument = if is_json {
        serde_json::from_str(text).map_err(|error| parse_error(path, error))?
    } else {
        toml::from_str(text).map_err(|error| parse_error(path, error))?
    };

    validate(&document)?;

    Ok(ServiceDefinition {
        name: document.name,
        context: document.context.into_shared(),
        methods: document.methods,
        groups: document.groups,
    })
}

fn parse_error(path: &Path, error: impl ToString) -> ModelError {
    ModelError::Parse {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

fn validate(document: &ModelDocument) -> Result<(), ModelError> {
    if document.name.trim().is_empty() {
        return Err(ModelError::Invalid("model name must not be empty".to_owned()));
    }

    let methods = document
        .methods
        .iter()
        .chain(document.groups.iter().flat_map(|group| group.methods.iter()));
    for method in methods {
        if method.name.trim().is_empty() {
            return Err(ModelError::Invalid(format!(
                "model {} declares a method without a name",
                document.name
            )));
        }
    }

    Ok(())
}
