use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One student's attempt at one graded block. Every field is non-empty once built
/// by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StudentItem {
    pub(crate) item_id: String,
    pub(crate) item_type: String,
    pub(crate) course_id: String,
    pub(crate) student_id: String,
}

/// Everything the extractor pulls out of one xqueue callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ExtractedItem {
    pub(crate) student_item: StudentItem,
    pub(crate) student_answer: Value,
    pub(crate) queue_name: String,
    pub(crate) grader: String,
    pub(crate) score: Option<f64>,
}

/// Body sent to the submission service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SubmissionRequest {
    pub(crate) student_item: StudentItem,
    pub(crate) answer: Value,
    pub(crate) queue_name: String,
    pub(crate) grader: String,
    pub(crate) score: Option<f64>,
}

impl From<ExtractedItem> for SubmissionRequest {
    fn from(item: ExtractedItem) -> Self {
        Self {
            student_item: item.student_item,
            answer: item.student_answer,
            queue_name: item.queue_name,
            grader: item.grader,
            score: item.score,
        }
    }
}

/// Inbound callback: xqueue's header/body pair, each a JSON object or its encoded string.
#[derive(Debug, Deserialize)]
pub(crate) struct XQueueCallback {
    pub(crate) xqueue_header: Value,
    pub(crate) xqueue_body: Value,
}
