use std::sync::Arc;

use crate::domain::{
    context::{BindableContext, BoundValue},
    error::EvaluationError,
    model::BindingExpression,
};

/// Expression text that resolves to the configured base endpoint.
pub const ROOT_TOKEN: &str = "{BaseUri}";

/// Reduces binding expressions to URL text against one root context.
pub struct Evaluator<'a> {
    base_endpoint: &'a str,
    root: Arc<dyn BindableContext>,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(base_endpoint: &'a str, root: Arc<dyn BindableContext>) -> Self {
        Self {
            base_endpoint,
            root,
        }
    }

    /// Evaluates `expression` and renders the result as text.
    pub fn evaluate_text(&self, expression: &BindingExpression) -> Result<String, EvaluationError> {
        let value = self.evaluate(expression)?;
        render_text(value, expression)
    }

    pub fn evaluate(&self, expression: &BindingExpression) -> Result<BoundValue, EvaluationError> {
        if expression.to_string().eq_ignore_ascii_case(ROOT_TOKEN) {
            return Ok(BoundValue::text(self.base_endpoint));
        }

        match expression {
            BindingExpression::Literal { text } => Ok(BoundValue::text(text.as_str())),
            BindingExpression::Concat { items } => {
                let mut url = String::new();
                for item in items {
                    url.push_str(&self.evaluate_text(item)?);
                }
                Ok(BoundValue::Text(url))
            }
            BindingExpression::Conditional { inner } => {
                let text = self.evaluate_text(inner)?;
                Ok(BoundValue::Text(format!("[{text}]")))
            }
            BindingExpression::Instance => Ok(BoundValue::Context(Arc::clone(&self.root))),
            BindingExpression::Property { base, name } => {
                let context = match self.evaluate(base)? {
                    BoundValue::Null => {
                        return Err(EvaluationError::AbsentBase(base.to_string()));
                    }
                    BoundValue::Context(context) => Some(context),
                    BoundValue::Text(_) => None,
                };

                Ok(context
                    .and_then(|context| context.try_get_property(name))
                    .unwrap_or_else(|| BoundValue::Text(placeholder(name))))
            }
            BindingExpression::Parameter { name } => name
                .split(['.', '{', '}'])
                .filter(|part| !part.is_empty())
                .last()
                .map(|last| BoundValue::Text(placeholder(last)))
                .ok_or_else(|| EvaluationError::EmptyParameter(name.clone())),
            BindingExpression::Formatting { format } => {
                Ok(BoundValue::Text(format!("{{{format}}}")))
            }
            BindingExpression::Unsupported => Err(EvaluationError::UnsupportedExpression(
                expression.kind().to_owned(),
            )),
        }
    }
}

fn render_text(value: BoundValue, source: &BindingExpression) -> Result<String, EvaluationError> {
    match value {
        BoundValue::Null => Ok(String::new()),
        BoundValue::Text(text) => Ok(text),
        BoundValue::Context(_) => Err(EvaluationError::UnrenderableContext(source.to_string())),
    }
}

/// `{name}` with the first character lower-cased.
fn placeholder(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{{{}{}}}", first.to_lowercase(), chars.as_str()),
        None => "{}".to_owned(),
    }
}
