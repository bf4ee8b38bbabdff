use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Row of the LMS `courseware_studentmodule` table, reduced to what grading needs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct StudentModule {
    pub(crate) id: i64,
    pub(crate) module_type: String,
    pub(crate) module_state_key: String,
    pub(crate) course_id: String,
    pub(crate) student_id: i64,
    pub(crate) grade: Option<f64>,
    pub(crate) max_grade: Option<f64>,
    pub(crate) created: OffsetDateTime,
    pub(crate) modified: OffsetDateTime,
}
