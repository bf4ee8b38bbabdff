use std::borrow::Cow;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DocumentError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Accepts a JSON object as-is or decodes one from its string form.
pub(crate) fn normalize(document: &Value) -> Result<Cow<'_, Map<String, Value>>, DocumentError> {
    match document {
        Value::Object(map) => Ok(Cow::Borrowed(map)),
        Value::String(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => Ok(Cow::Owned(map)),
            other => Err(DocumentError::NotAnObject(json_type(&other))),
        },
        other => Err(DocumentError::NotAnObject(json_type(other))),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
