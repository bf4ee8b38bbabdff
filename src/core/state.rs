use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Settings;
use crate::services::xqueue_submission::XQueueSubmission;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    db: PgPool,
    xqueue: XQueueSubmission,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool, xqueue: XQueueSubmission) -> Self {
        Self { inner: Arc::new(InnerState { settings, db, xqueue }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub(crate) fn xqueue(&self) -> &XQueueSubmission {
        &self.inner.xqueue
    }
}
