use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::domain::{context::BindableContext, error::ModelError};

/// Expression tree describing how a method's URL is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum BindingExpression {
    Literal {
        text: String,
    },
    Concat {
        items: Vec<BindingExpression>,
    },
    /// Optional URL segment.
    Conditional {
        inner: Box<BindingExpression>,
    },
    Instance,
    Property {
        base: Box<BindingExpression>,
        name: String,
    },
    Parameter {
        name: String,
    },
    Formatting {
        format: String,
    },
    #[serde(other)]
    Unsupported,
}

impl BindingExpression {
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal { text: text.into() }
    }

    #[must_use]
    pub fn concat(items: impl IntoIterator<Item = BindingExpression>) -> Self {
        Self::Concat {
            items: items.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn conditional(inner: BindingExpression) -> Self {
        Self::Conditional {
            inner: Box::new(inner),
        }
    }

    #[must_use]
    pub fn instance() -> Self {
        Self::Instance
    }

    #[must_use]
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::Parameter { name: name.into() }
    }

    #[must_use]
    pub fn formatting(format: impl Into<String>) -> Self {
        Self::Formatting {
            format: format.into(),
        }
    }

    /// `self.name`
    #[must_use]
    pub fn property(self, name: impl Into<String>) -> Self {
        Self::Property {
            base: Box::new(self),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "literal",
            Self::Concat { .. } => "concat",
            Self::Conditional { .. } => "conditional",
            Self::Instance => "instance",
            Self::Property { .. } => "property",
            Self::Parameter { .. } => "parameter",
            Self::Formatting { .. } => "formatting",
            Self::Unsupported => "unsupported",
        }
    }

    fn property_path(&self) -> Option<String> {
        match self {
            Self::Instance => Some(String::new()),
            Self::Property { base, name } => base.property_path().map(|path| {
                if path.is_empty() {
                    name.clone()
                } else {
                    format!("{path}.{name}")
                }
            }),
            _ => None,
        }
    }
}

impl fmt::Display for BindingExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { text } => f.write_str(text),
            Self::Concat { items } => items.iter().try_for_each(|item| write!(f, "{item}")),
            Self::Conditional { inner } => write!(f, "[{inner}]"),
            Self::Instance => Ok(()),
            Self::Property { base, name } => match self.property_path() {
                Some(path) => write!(f, "{{{path}}}"),
                None => write!(f, "{base}.{name}"),
            },
            Self::Parameter { name } => {
                write!(f, "{{{}}}", name.trim_start_matches('{').trim_end_matches('}'))
            }
            Self::Formatting { format } => write!(f, "{{{format}}}"),
            Self::Unsupported => f.write_str("<unsupported>"),
        }
    }
}

/// Serialization shape of a request or response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TypeMetadata {
    Object {
        members: Vec<Member>,
    },
    Array {
        element_format: Option<Box<TypeMetadata>>,
        element_type: Option<Box<TypeMetadata>>,
    },
    Dictionary,
    Enum {
        values: Vec<String>,
    },
    Primitive {
        name: String,
        #[serde(default)]
        nullable: bool,
    },
    Xml,
    #[serde(other)]
    Unsupported,
}

impl TypeMetadata {
    #[must_use]
    pub fn object(members: impl IntoIterator<Item = Member>) -> Self {
        Self::Object {
            members: members.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn array_of(element_format: TypeMetadata) -> Self {
        Self::Array {
            element_format: Some(Box::new(element_format)),
            element_type: None,
        }
    }

    #[must_use]
    pub fn enumeration<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive {
            name: name.into(),
            nullable: false,
        }
    }

    #[must_use]
    pub fn nullable(name: impl Into<String>) -> Self {
        Self::Primitive {
            name: name.into(),
            nullable: true,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Object { .. } => "object",
            Self::Array { .. } => "array",
            Self::Dictionary => "dictionary",
            Self::Enum { .. } => "enum",
            Self::Primitive { .. } => "primitive",
            Self::Xml => "xml",
            Self::Unsupported => "unsupported",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    #[serde(rename = "type")]
    pub metadata: TypeMetadata,
    /// Envelope member: the owning object renders as this member's schema.
    #[serde(default)]
    pub pass_through: bool,
}

impl Member {
    #[must_use]
    pub fn new(name: impl Into<String>, metadata: TypeMetadata) -> Self {
        Self {
            name: name.into(),
            metadata,
            pass_through: false,
        }
    }

    #[must_use]
    pub fn pass_through(mut self) -> Self {
        self.pass_through = true;
        self
    }
}

/// HTTP verb of a method. Verbs outside the common set are kept verbatim,
/// upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
    Options,
    Other(String),
}

impl HttpVerb {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
            Self::Other(verb) => verb,
        }
    }
}

impl From<String> for HttpVerb {
    fn from(verb: String) -> Self {
        let verb = verb.trim().to_uppercase();
        match verb.as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "HEAD" => Self::Head,
            "PATCH" => Self::Patch,
            "OPTIONS" => Self::Options,
            _ => Self::Other(verb),
        }
    }
}

impl From<HttpVerb> for String {
    fn from(verb: HttpVerb) -> Self {
        match verb {
            HttpVerb::Other(verb) => verb,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One callable operation of a service model.
///
/// Bodies are declared as lists; a schema is only rendered when exactly one
/// body is declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    pub name: String,
    pub http_verb: HttpVerb,
    pub url: BindingExpression,
    #[serde(default)]
    pub request_bodies: Vec<TypeMetadata>,
    #[serde(default)]
    pub response_bodies: Vec<TypeMetadata>,
}

impl MethodDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, http_verb: HttpVerb, url: BindingExpression) -> Self {
        Self {
            name: name.into(),
            http_verb,
            url,
            request_bodies: Vec::new(),
            response_bodies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_request_body(mut self, body: TypeMetadata) -> Self {
        self.request_bodies.push(body);
        self
    }

    #[must_use]
    pub fn with_response_body(mut self, body: TypeMetadata) -> Self {
        self.response_bodies.push(body);
        self
    }

    #[must_use]
    pub fn request_body(&self) -> Option<&TypeMetadata> {
        single(&self.request_bodies)
    }

    #[must_use]
    pub fn response_body(&self) -> Option<&TypeMetadata> {
        single(&self.response_bodies)
    }
}

fn single(bodies: &[TypeMetadata]) -> Option<&TypeMetadata> {
    match bodies {
        [body] => Some(body),
        _ => None,
    }
}

/// Sub-resource grouping of methods (e.g. `Sites`, `ServerFarms`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationGroup {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

/// Fully resolved service model: the root binding context plus every method.
#[derive(Clone)]
pub struct ServiceDefinition {
    pub name: String,
    pub context: Arc<dyn BindableContext>,
    pub methods: Vec<MethodDescriptor>,
    pub groups: Vec<OperationGroup>,
}

impl ServiceDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, context: Arc<dyn BindableContext>) -> Self {
        Self {
            name: name.into(),
            context,
            methods: Vec::new(),
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: OperationGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Top-level methods first, then each group's methods in declaration order.
    pub fn all_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods
            .iter()
            .chain(self.groups.iter().flat_map(|group| group.methods.iter()))
    }
}

impl fmt::Debug for ServiceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDefinition")
            .field("name", &self.name)
            .field("methods", &self.methods)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

/// Source of a service definition. Catalogs are cached per implementing type.
pub trait ServiceModel: Send + Sync + 'static {
    fn instantiate(&self) -> Result<ServiceDefinition, ModelError>;
}
