use std::backtrace::Backtrace;
use std::panic;
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use bailout_core::Failure;
use http::header;

use crate::sink::LogSink;

/// Request-scoped interception point for structured failures
///
/// Wraps the rest of the request pipeline. A [`Failure`] raised while the
/// inner handler runs is turned into a plain-text response; a `500` is logged
/// with its stack trace first. Panics with any other payload are resumed
/// unchanged, leaving them to the host's own panic handling.
#[derive(Debug, Clone)]
pub struct RecoveryBoundary {
    sink: Arc<dyn LogSink>,
}

impl RecoveryBoundary {
    /// Create a boundary logging through `sink`
    ///
    /// Also installs the failure-aware panic hook so expected aborts do not
    /// spam stderr.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        bailout_core::hook::install();
        Self { sink }
    }

    /// Middleware entry point for `axum::middleware::from_fn`
    pub async fn intercept(&self, request: Request, next: Next) -> Response {
        match bailout_core::recover_async(next.run(request)).await {
            Ok(response) => response,
            Err(failure) => self.respond(&failure),
        }
    }

    /// Render a failure as a response, logging it first if it is internal
    pub fn respond(&self, failure: &Failure) -> Response {
        if failure.is_internal() {
            self.log_internal(failure);
        }

        plain_error(failure)
    }

    fn log_internal(&self, failure: &Failure) {
        let line = match failure.trace() {
            Some(trace) => format!("PANIC: {}\n{trace}", failure.message()),
            None => format!("PANIC: {}\n{}", failure.message(), Backtrace::force_capture()),
        };

        // The sink must not turn a logged failure into a second abort
        if panic::catch_unwind(panic::AssertUnwindSafe(|| self.sink.write(&line))).is_err() {
            tracing::warn!("recovery log sink panicked");
        }
    }
}

/// Plain-text error response: the message plus one trailing newline
fn plain_error(failure: &Failure) -> Response {
    (
        failure.status(),
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        format!("{}\n", failure.message()),
    )
        .into_response()
}
