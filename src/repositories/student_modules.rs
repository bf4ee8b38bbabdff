use sqlx::PgPool;

use crate::db::models::StudentModule;

/// `module_state_key` is stored in the `module_id` column.
pub(crate) const COLUMNS: &str = "\
    id::BIGINT AS id, module_type, module_id AS module_state_key, course_id, \
    student_id::BIGINT AS student_id, grade::DOUBLE PRECISION AS grade, \
    max_grade::DOUBLE PRECISION AS max_grade, created, modified";

pub(crate) async fn latest_for_block(
    pool: &PgPool,
    module_state_key: &str,
    course_id: &str,
) -> Result<Option<StudentModule>, sqlx::Error> {
    sqlx::query_as::<_, StudentModule>(&format!(
        "SELECT {COLUMNS}
         FROM courseware_studentmodule
         WHERE module_id = $1 AND course_id = $2
         ORDER BY modified DESC, id DESC
         LIMIT 1"
    ))
    .bind(module_state_key)
    .bind(course_id)
    .fetch_optional(pool)
    .await
}
