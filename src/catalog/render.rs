use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    catalog::{evaluator::Evaluator, schema::infer_schema, variants::expand_url},
    domain::{
        error::RenderError,
        model::{HttpVerb, MethodDescriptor},
    },
};

/// One catalog entry: a method bound to one URL variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationRecord {
    pub method_name: String,
    #[serde(rename = "HttpMethod")]
    pub http_verb: HttpVerb,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<Value>,
}

/// Renders one record per URL variant of `method`.
pub fn render_method(
    evaluator: &Evaluator<'_>,
    method: &MethodDescriptor,
) -> Result<Vec<OperationRecord>, RenderError> {
    let request_body = method
        .request_body()
        .map(infer_schema)
        .transpose()
        .map_err(RenderError::RequestBody)?;
    let response_body = method
        .response_body()
        .map(infer_schema)
        .transpose()
        .map_err(RenderError::ResponseBody)?;

    let url = evaluator.evaluate_text(&method.url)?;

    Ok(expand_url(&url)
        .into_iter()
        .map(|url| OperationRecord {
            method_name: method.name.clone(),
            http_verb: method.http_verb.clone(),
            url,
            request_body: request_body.clone(),
            response_body: response_body.clone(),
        })
        .collect())
}
