use axum::extract::{Path, Query};
use bailout_core::assert;
use http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProbeParams {
    #[serde(default)]
    message: String,
}

/// Answer with a structured failure for the status code in the path
///
/// `?message=` overrides the reason phrase. Anything that is not a valid
/// status code is rejected with `400`.
pub async fn probe_handler(Path(code): Path<String>, Query(params): Query<ProbeParams>) {
    let code: u16 = assert::success(code.parse(), StatusCode::BAD_REQUEST, "invalid status code");
    let status = assert::success(StatusCode::from_u16(code), StatusCode::BAD_REQUEST, "invalid status code");

    tracing::debug!(%status, "status probe");
    assert::throw(status, params.message);
}
