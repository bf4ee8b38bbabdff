use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::core::config::Settings;
use crate::schemas::submission::SubmissionRequest;

#[derive(Debug, Error)]
pub(crate) enum SubmissionApiError {
    #[error("submission service request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("submission service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("submission service returned an undecodable body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// The grading-submission service that stores a student's answer for a queue.
#[async_trait]
pub(crate) trait SubmissionService: Send + Sync {
    async fn create_submission(
        &self,
        request: &SubmissionRequest,
    ) -> Result<Value, SubmissionApiError>;
}

#[derive(Debug, Clone)]
pub(crate) struct HttpSubmissionService {
    client: Client,
    endpoint: String,
}

impl HttpSubmissionService {
    pub(crate) fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let submissions = settings.submissions();
        let client = Client::builder()
            .connect_timeout(submissions.connect_timeout())
            .timeout(submissions.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, endpoint: submissions_endpoint(&submissions.api_url) })
    }
}

fn submissions_endpoint(api_url: &str) -> String {
    format!("{}/submissions", api_url.trim_end_matches('/'))
}

#[async_trait]
impl SubmissionService for HttpSubmissionService {
    async fn create_submission(
        &self,
        request: &SubmissionRequest,
    ) -> Result<Value, SubmissionApiError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            item_id = %request.student_item.item_id,
            queue_name = %request.queue_name,
            "Posting submission"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(SubmissionApiError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(SubmissionApiError::Transport)?;
        if !status.is_success() {
            return Err(SubmissionApiError::Status { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(SubmissionApiError::Decode)
    }
}
