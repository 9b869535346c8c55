use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Property lookup capability exposed by objects that `Instance` and
/// property-path expressions can bind to.
pub trait BindableContext: Send + Sync {
    /// Returns `None` when the object has no property called `name`.
    fn try_get_property(&self, name: &str) -> Option<BoundValue>;
}

/// Value produced by evaluating a binding expression.
#[derive(Clone)]
pub enum BoundValue {
    Null,
    Text(String),
    Context(Arc<dyn BindableContext>),
}

impl BoundValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Debug for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Context(_) => f.write_str("Context(..)"),
        }
    }
}

impl PartialEq for BoundValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::Context(left), Self::Context(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

/// Property bag loaded from a model file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextObject {
    properties: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Object(Arc<ContextObject>),
}

impl PropertyValue {
    #[must_use]
    pub fn object(object: ContextObject) -> Self {
        Self::Object(Arc::new(object))
    }
}

impl ContextObject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, PropertyValue::Text(value.into()))
    }

    #[must_use]
    pub fn into_shared(self) -> Arc<dyn BindableContext> {
        Arc::new(self)
    }
}

impl BindableContext for ContextObject {
    fn try_get_property(&self, name: &str) -> Option<BoundValue> {
        let value = self.properties.get(name)?;
        Some(match value {
            PropertyValue::Null => BoundValue::Null,
            PropertyValue::Bool(flag) => BoundValue::Text(flag.to_string()),
            PropertyValue::Integer(number) => BoundValue::Text(number.to_string()),
            PropertyValue::Float(number) => BoundValue::Text(number.to_string()),
            PropertyValue::Text(text) => BoundValue::Text(text.clone()),
            PropertyValue::Object(object) => {
                BoundValue::Context(Arc::<ContextObject>::clone(object))
            }
        })
    }
}
