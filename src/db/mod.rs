pub(crate) mod models;

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

use crate::core::config::Settings;

/// Pool over the LMS database. The bridge only reads `courseware_studentmodule`.
pub(crate) async fn init_pool(settings: &Settings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .test_before_acquire(true)
        .connect_with(connect_options(settings)?)
        .await
}

fn connect_options(settings: &Settings) -> Result<PgConnectOptions, sqlx::Error> {
    let database_url = settings.database().database_url();
    let connect_options: PgConnectOptions = database_url.parse()?;

    Ok(connect_options.application_name("xqueue-submission").disable_statement_logging())
}
