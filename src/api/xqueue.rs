use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;

use crate::core::state::AppState;
use crate::schemas::submission::XQueueCallback;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/submit", post(submit))
}

/// Forwards one xqueue callback. The body is always the forwarder's mapping; a
/// folded error is answered with 422.
async fn submit(
    State(state): State<AppState>,
    Json(callback): Json<XQueueCallback>,
) -> (StatusCode, Json<Value>) {
    let result =
        state.xqueue().send_to_submission(&callback.xqueue_header, &callback.xqueue_body).await;

    let status = if result.get("error").is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    (status, Json(result))
}
