use sqlx::PgPool;

pub(crate) async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1 FROM courseware_studentmodule LIMIT 1").execute(pool).await?;
    Ok(())
}
