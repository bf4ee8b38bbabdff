use serde_json::{json, Value};
use thiserror::Error;

use crate::services::callback_url::InvalidCallbackUrl;
use crate::services::course_keys::KeyParseError;
use crate::services::submissions_api::SubmissionApiError;

/// Failure categories of the xqueue bridge. `Display` renders `"<category>: <message>"`,
/// which is exactly what callers receive under the `error` key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum SubmissionError {
    #[error("JSON decode error: {0}")]
    Parse(String),
    #[error("Missing key: {0}")]
    MissingKey(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Type error: {0}")]
    Type(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl SubmissionError {
    pub(crate) fn category(&self) -> &'static str {
        match self {
            SubmissionError::Parse(_) => "JSON decode error",
            SubmissionError::MissingKey(_) => "Missing key",
            SubmissionError::Validation(_) => "Validation error",
            SubmissionError::Type(_) => "Type error",
            SubmissionError::Runtime(_) => "Runtime error",
        }
    }

    /// Metric label for the failure.
    pub(crate) fn outcome(&self) -> &'static str {
        match self {
            SubmissionError::Parse(_) => "json_decode_error",
            SubmissionError::MissingKey(_) => "missing_key",
            SubmissionError::Validation(_) => "validation_error",
            SubmissionError::Type(_) => "type_error",
            SubmissionError::Runtime(_) => "runtime_error",
        }
    }

    pub(crate) fn message(&self) -> &str {
        match self {
            SubmissionError::Parse(message)
            | SubmissionError::MissingKey(message)
            | SubmissionError::Validation(message)
            | SubmissionError::Type(message)
            | SubmissionError::Runtime(message) => message,
        }
    }

    pub(crate) fn to_response(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

impl From<InvalidCallbackUrl> for SubmissionError {
    fn from(err: InvalidCallbackUrl) -> Self {
        SubmissionError::Validation(err.to_string())
    }
}

impl From<KeyParseError> for SubmissionError {
    fn from(err: KeyParseError) -> Self {
        SubmissionError::Validation(format!("Error converting item_id or course_id to keys: {err}"))
    }
}

impl From<SubmissionApiError> for SubmissionError {
    fn from(err: SubmissionApiError) -> Self {
        match err {
            SubmissionApiError::Decode(source) => SubmissionError::Parse(format!(
                "submission service returned an undecodable body: {source}"
            )),
            other => SubmissionError::Runtime(other.to_string()),
        }
    }
}
