use std::any::Any;
use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use http::StatusCode;

use crate::status::status_text;

/// An expected request failure: a status code paired with a message
///
/// Failures are raised by unwinding the current call stack with the failure
/// as the panic payload (see [`Failure::raise`]). The message is resolved when
/// the value is built, so an empty message becomes the status reason phrase.
///
/// Internal server errors capture a full backtrace at the point where they are
/// raised; other statuses carry no trace.
#[derive(Debug, Clone)]
pub struct Failure {
    status: StatusCode,
    message: String,
    trace: Option<Arc<Backtrace>>,
}

impl Failure {
    /// Build a failure, resolving an empty message to the status reason phrase
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = status_text(status).to_owned();
        }

        Self {
            status,
            message,
            trace: None,
        }
    }

    /// Build a `500 Internal Server Error` failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Build a failure only if `condition_failed` holds
    ///
    /// Pure value construction: nothing is raised.
    pub fn check(condition_failed: bool, status: StatusCode, message: impl Into<String>) -> Option<Self> {
        condition_failed.then(|| Self::new(status, message))
    }

    /// HTTP status of the failure
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Resolved, never-empty message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Backtrace captured when an internal failure was raised
    #[must_use]
    pub fn trace(&self) -> Option<&Backtrace> {
        self.trace.as_deref()
    }

    /// Whether this failure is a server fault (`500`)
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.status == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Abort the current call stack with this failure as the panic payload
    ///
    /// # Panics
    ///
    /// Always. The unwind stops at the nearest recovery point; without one it
    /// ends the current thread.
    pub fn raise(mut self) -> ! {
        if self.is_internal() && self.trace.is_none() {
            self.trace = Some(Arc::new(Backtrace::force_capture()));
        }

        std::panic::panic_any(self)
    }

    /// Recover a failure from a caught panic payload
    ///
    /// # Errors
    ///
    /// Returns the untouched payload when it is not a [`Failure`], so the
    /// caller can resume unwinding with it.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Result<Self, Box<dyn Any + Send>> {
        payload.downcast::<Self>().map(|failure| *failure)
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status && self.message == other.message
    }
}

impl Eq for Failure {}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Failure {}
