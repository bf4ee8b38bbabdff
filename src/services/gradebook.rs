use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::models::StudentModule;
use crate::services::course_keys::{CourseKey, UsageKey};

/// Read access to the LMS courseware state that holds per-block grades.
#[async_trait]
pub(crate) trait GradebookStore: Send + Sync {
    /// Most recently modified record for the block in the course, if any.
    async fn latest_record(
        &self,
        usage_key: &UsageKey,
        course_key: &CourseKey,
    ) -> Result<Option<StudentModule>>;

    /// Grade of the latest record; `None` when there is no record or no grade yet.
    async fn score(&self, usage_key: &UsageKey, course_key: &CourseKey) -> Result<Option<f64>> {
        let record = self.latest_record(usage_key, course_key).await?;
        Ok(record.and_then(|module| module.grade))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PgGradebook {
    pool: PgPool,
}

impl PgGradebook {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GradebookStore for PgGradebook {
    async fn latest_record(
        &self,
        usage_key: &UsageKey,
        course_key: &CourseKey,
    ) -> Result<Option<StudentModule>> {
        crate::repositories::student_modules::latest_for_block(
            &self.pool,
            &usage_key.to_string(),
            &course_key.to_string(),
        )
        .await
        .context("Failed to query courseware_studentmodule")
    }
}
