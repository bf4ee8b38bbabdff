//! Bridge from xqueue score-update callbacks to the submission service.
//!
//! A callback carries a header (with the LMS callback URL and queue name) and a
//! payload (student info, response, grader payload). Either may arrive as a JSON
//! object or as its encoded string.

mod errors;

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use sqlx::PgPool;

pub(crate) use self::errors::SubmissionError;
use crate::core::config::Settings;
use crate::core::metrics;
use crate::schemas::submission::{ExtractedItem, StudentItem, SubmissionRequest};
use crate::services::callback_url::CallbackIdentifiers;
use crate::services::course_keys::{CourseKey, UsageKey};
use crate::services::documents::{self, json_type, DocumentError};
use crate::services::gradebook::{GradebookStore, PgGradebook};
use crate::services::submissions_api::{HttpSubmissionService, SubmissionService};

#[derive(Clone)]
pub(crate) struct XQueueSubmission {
    gradebook: Arc<dyn GradebookStore>,
    submissions: Arc<dyn SubmissionService>,
    default_queue_name: String,
}

impl XQueueSubmission {
    pub(crate) fn new(
        gradebook: Arc<dyn GradebookStore>,
        submissions: Arc<dyn SubmissionService>,
        default_queue_name: impl Into<String>,
    ) -> Self {
        Self { gradebook, submissions, default_queue_name: default_queue_name.into() }
    }

    pub(crate) fn from_settings(settings: &Settings, pool: PgPool) -> anyhow::Result<Self> {
        let submissions = HttpSubmissionService::from_settings(settings)?;
        Ok(Self::new(
            Arc::new(PgGradebook::new(pool)),
            Arc::new(submissions),
            settings.submissions().default_queue_name.clone(),
        ))
    }

    /// Pulls the student item, answer, queue, grader and current score out of a
    /// callback. Nothing is written anywhere.
    pub(crate) async fn extract_item_data(
        &self,
        header: &Value,
        payload: &Value,
    ) -> Result<ExtractedItem, SubmissionError> {
        let header = top_level_document("header", header)?;
        let payload = top_level_document("payload", payload)?;

        let callback_url = required_str(&header, "lms_callback_url", "header")?;
        let queue_name = optional_str(&header, "queue_name", "header")?
            .filter(|name| !name.is_empty())
            .unwrap_or(self.default_queue_name.as_str())
            .to_string();

        let identifiers = CallbackIdentifiers::parse(callback_url)?;
        let item_id = identifiers.block_locator();
        let usage_key = UsageKey::parse(&item_id)?;
        let course_key = CourseKey::parse(&identifiers.course_id)?;

        let student_info = payload
            .get("student_info")
            .ok_or_else(|| SubmissionError::MissingKey("student_info".to_string()))?;
        let student_info = embedded_document("student_info", student_info)?;
        let student_id = required_str(&student_info, "anonymous_student_id", "student_info")?;

        let student_answer = match payload.get("student_response") {
            None | Some(Value::Null) => {
                return Err(SubmissionError::Validation(
                    "The field 'student_response' is not present in payload".to_string(),
                ))
            }
            Some(answer) => answer.clone(),
        };

        let grader = match payload.get("grader_payload") {
            None | Some(Value::Null) => String::new(),
            Some(grader_payload) => {
                let grader_payload =
                    documents::normalize(grader_payload).map_err(|err| match err {
                        DocumentError::Json(err) => {
                            SubmissionError::Parse(format!("Error parsing grader_payload: {err}"))
                        }
                        other => SubmissionError::Validation(format!("grader_payload: {other}")),
                    })?;
                if !grader_payload.contains_key("grader") {
                    return Err(SubmissionError::Validation(
                        "The field 'grader' is not present in grader_payload".to_string(),
                    ));
                }
                optional_str(&grader_payload, "grader", "grader_payload")?
                    .unwrap_or_default()
                    .to_string()
            }
        };

        let score = self.gradebook.score(&usage_key, &course_key).await.map_err(|err| {
            tracing::error!(
                error = %format!("{err:#}"),
                item_id = %item_id,
                "Gradebook lookup failed"
            );
            SubmissionError::Runtime(format!("{err:#}"))
        })?;

        tracing::debug!(
            item_id = %item_id,
            block_type = usage_key.block_type(),
            block_id = usage_key.block_id(),
            course_id = %course_key,
            block_course_id = %usage_key.course_key(),
            student_id,
            score = ?score,
            "Extracted xqueue item"
        );

        Ok(ExtractedItem {
            student_item: StudentItem {
                item_id,
                item_type: identifiers.item_type,
                course_id: identifiers.course_id,
                student_id: student_id.to_string(),
            },
            student_answer,
            queue_name,
            grader,
            score,
        })
    }

    /// Extracts the callback and creates a submission. Never fails: errors come back
    /// as `{"error": "<category>: <message>"}` and no submission is created.
    pub(crate) async fn send_to_submission(&self, header: &Value, payload: &Value) -> Value {
        let started = Instant::now();

        match self.forward(header, payload).await {
            Ok(submission) => {
                metrics::record_submission("submitted", started.elapsed().as_secs_f64());
                submission
            }
            Err(err) => {
                metrics::record_submission(err.outcome(), started.elapsed().as_secs_f64());
                tracing::warn!(
                    category = err.category(),
                    error = err.message(),
                    "Submission rejected"
                );
                err.to_response()
            }
        }
    }

    async fn forward(&self, header: &Value, payload: &Value) -> Result<Value, SubmissionError> {
        let request = SubmissionRequest::from(self.extract_item_data(header, payload).await?);
        let submission = self.submissions.create_submission(&request).await?;

        tracing::info!(
            item_id = %request.student_item.item_id,
            queue_name = %request.queue_name,
            grader = %request.grader,
            score = ?request.score,
            "Submission created"
        );

        Ok(submission)
    }
}

fn top_level_document<'a>(
    name: &str,
    document: &'a Value,
) -> Result<Cow<'a, Map<String, Value>>, SubmissionError> {
    documents::normalize(document).map_err(|err| match err {
        DocumentError::Json(err) => {
            SubmissionError::Validation(format!("Error parsing {name}: {err}"))
        }
        other => SubmissionError::Type(format!("{name}: {other}")),
    })
}

fn embedded_document<'a>(
    name: &str,
    document: &'a Value,
) -> Result<Cow<'a, Map<String, Value>>, SubmissionError> {
    documents::normalize(document).map_err(|err| match err {
        DocumentError::Json(err) => SubmissionError::Parse(format!("Error parsing {name}: {err}")),
        other => SubmissionError::Type(format!("{name}: {other}")),
    })
}

/// Absent, null and empty strings are all "missing".
fn required_str<'a>(
    document: &'a Map<String, Value>,
    key: &str,
    document_name: &str,
) -> Result<&'a str, SubmissionError> {
    match optional_str(document, key, document_name)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SubmissionError::Validation(format!(
            "The field '{key}' is not present in {document_name}"
        ))),
    }
}

fn optional_str<'a>(
    document: &'a Map<String, Value>,
    key: &str,
    document_name: &str,
) -> Result<Option<&'a str>, SubmissionError> {
    match document.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(other) => Err(SubmissionError::Type(format!(
            "'{key}' in {document_name} must be a string, got {}",
            json_type(other)
        ))),
    }
}
