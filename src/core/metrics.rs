use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) const SUBMISSIONS_TOTAL: &str = "xqueue_submissions_total";
pub(crate) const SUBMISSION_DURATION: &str = "xqueue_submission_duration_seconds";

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled || PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}

/// Counts one forwarded callback; `outcome` is `"submitted"` or an error category slug.
pub(crate) fn record_submission(outcome: &'static str, seconds: f64) {
    metrics::counter!(SUBMISSIONS_TOTAL, "outcome" => outcome).increment(1);
    metrics::histogram!(SUBMISSION_DURATION, "outcome" => outcome).record(seconds);
}
