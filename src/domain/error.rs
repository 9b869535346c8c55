use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// Failure to produce a [`ServiceDefinition`](crate::domain::model::ServiceDefinition)
/// from its source.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model {path}: {message}")]
    Read { path: String, message: String },
    #[error("failed to parse model {path}: {message}")]
    Parse { path: String, message: String },
    #[error("invalid model: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("expression `{0}` resolved to no value")]
    AbsentBase(String),
    #[error("parameter reference `{0}` has no name")]
    EmptyParameter(String),
    #[error("unsupported binding expression kind `{0}`")]
    UnsupportedExpression(String),
    #[error("context object produced by `{0}` cannot be rendered as text")]
    UnrenderableContext(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaInferenceError {
    #[error("array declares neither an element format nor an element type")]
    MissingArrayElement,
    #[error("unsupported array element type `{0}`")]
    UnsupportedArrayElement(String),
    #[error("unsupported type metadata kind `{0}`")]
    UnsupportedType(String),
}

/// Error scoped to rendering a single method; never aborts a catalog build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("url: {0}")]
    Url(#[from] EvaluationError),
    #[error("request body: {0}")]
    RequestBody(SchemaInferenceError),
    #[error("response body: {0}")]
    ResponseBody(SchemaInferenceError),
}
