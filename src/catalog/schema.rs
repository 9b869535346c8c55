use serde_json::{Map, Value};

use crate::domain::{error::SchemaInferenceError, model::TypeMetadata};

/// Infers the simplified JSON schema of a request or response body.
///
/// Objects map member names to member schemas in declaration order, arrays
/// hold a single element schema, and leaf types render as `(typename)` or
/// `(a|b|c)` strings.
pub fn infer_schema(metadata: &TypeMetadata) -> Result<Value, SchemaInferenceError> {
    match metadata {
        TypeMetadata::Object { members } => {
            let mut schema = Map::new();
            for member in members {
                if member.pass_through {
                    return infer_schema(&member.metadata);
                }
                schema.insert(member.name.clone(), infer_schema(&member.metadata)?);
            }
            Ok(Value::Object(schema))
        }
        TypeMetadata::Array {
            element_format,
            element_type,
        } => {
            let element = match (element_format, element_type) {
                (Some(format), _) => infer_schema(format)?,
                (None, Some(element)) => known_type_schema(element)?,
                (None, None) => return Err(SchemaInferenceError::MissingArrayElement),
            };
            Ok(Value::Array(vec![element]))
        }
        TypeMetadata::Dictionary => Ok(Value::Object(Map::new())),
        TypeMetadata::Enum { .. } | TypeMetadata::Primitive { .. } => known_type_schema(metadata),
        TypeMetadata::Xml => Ok(Value::String("(xml)".to_owned())),
        TypeMetadata::Unsupported => Err(SchemaInferenceError::UnsupportedType(
            metadata.kind().to_owned(),
        )),
    }
}

fn known_type_schema(metadata: &TypeMetadata) -> Result<Value, SchemaInferenceError> {
    match metadata {
        TypeMetadata::Enum { values } => Ok(Value::String(format!("({})", values.join("|")))),
        TypeMetadata::Primitive { name, nullable } => {
            let name = if *nullable {
                nullable_inner_name(name)
            } else {
                name.as_str()
            };
            Ok(Value::String(format!("({})", name.to_lowercase())))
        }
        other => Err(SchemaInferenceError::UnsupportedArrayElement(
            other.kind().to_owned(),
        )),
    }
}

/// `Nullable<Int32>`, ``Nullable`1[Int32]`` and `Int32?` all yield `Int32`.
fn nullable_inner_name(name: &str) -> &str {
    let name = name.trim();
    if let Some(open) = name.find(['<', '[']) {
        let inner = name[open + 1..].trim_end_matches(['>', ']']);
        return inner.trim_start_matches('[').trim();
    }
    name.trim_end_matches('?')
}
