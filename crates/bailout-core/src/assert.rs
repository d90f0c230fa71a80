//! Assertion primitives
//!
//! Every function here either returns normally or aborts the current call
//! stack with a [`Failure`]. Control never comes back to the caller after an
//! abort; the nearest recovery point receives the failure instead.
//!
//! ```
//! use bailout_core::{assert, recover};
//! use http::StatusCode;
//!
//! fn parse_age(raw: &str) -> u8 {
//!     assert::success(raw.parse(), StatusCode::BAD_REQUEST, "Invalid age")
//! }
//!
//! assert_eq!(recover(|| parse_age("42")), Ok(42));
//! assert_eq!(recover(|| parse_age("old")).unwrap_err().message(), "Invalid age");
//! ```

use std::fmt::Display;

use http::StatusCode;

use crate::Failure;

/// Abort with `status` and `message` unless `condition` holds
///
/// An empty `message` selects the status reason phrase.
///
/// # Panics
///
/// Raises a [`Failure`] when `condition` is false.
pub fn ok(condition: bool, status: StatusCode, message: impl Into<String>) {
    if let Some(failure) = Failure::check(!condition, status, message) {
        failure.raise();
    }
}

/// Unwrap `result`, aborting with `status` and `message` on `Err`
///
/// The error value itself is discarded; use [`error`] to surface it.
///
/// # Panics
///
/// Raises a [`Failure`] when `result` is an error.
pub fn success<T, E>(result: Result<T, E>, status: StatusCode, message: impl Into<String>) -> T {
    match result {
        Ok(value) => value,
        Err(_) => throw(status, message),
    }
}

/// Unwrap `option`, aborting with `status` and `message` on `None`
///
/// # Panics
///
/// Raises a [`Failure`] when `option` is empty.
pub fn some<T>(option: Option<T>, status: StatusCode, message: impl Into<String>) -> T {
    option.unwrap_or_else(|| throw(status, message))
}

/// Unwrap `result`, aborting with `500 Internal Server Error` on `Err`
///
/// The failure message is the error's own text. Meant for operations that
/// are not expected to fail at all.
///
/// # Panics
///
/// Raises an internal [`Failure`] when `result` is an error.
pub fn error<T, E: Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => Failure::internal(e.to_string()).raise(),
    }
}

/// Abort unconditionally with `status` and `message`
///
/// # Panics
///
/// Always raises a [`Failure`].
pub fn throw(status: StatusCode, message: impl Into<String>) -> ! {
    Failure::new(status, message).raise()
}

/// Method-style assertions on `Result` and `Option`
///
/// ```
/// use bailout_core::{OrFail, recover};
/// use http::StatusCode;
///
/// let users = ["ada", "grace"];
/// let failure = recover(|| {
///     users.iter().find(|u| **u == "linus").or_fail(StatusCode::NOT_FOUND, "")
/// })
/// .unwrap_err();
///
/// assert_eq!(failure.message(), "Not Found");
/// ```
pub trait OrFail<T> {
    /// Unwrap the value or abort with `status` and `message`
    fn or_fail(self, status: StatusCode, message: impl Into<String>) -> T;

    /// Unwrap the value or abort with `500 Internal Server Error`
    fn or_internal(self) -> T;
}

impl<T, E: Display> OrFail<T> for Result<T, E> {
    fn or_fail(self, status: StatusCode, message: impl Into<String>) -> T {
        success(self, status, message)
    }

    fn or_internal(self) -> T {
        error(self)
    }
}

impl<T> OrFail<T> for Option<T> {
    fn or_fail(self, status: StatusCode, message: impl Into<String>) -> T {
        some(self, status, message)
    }

    fn or_internal(self) -> T {
        some(self, StatusCode::INTERNAL_SERVER_ERROR, "")
    }
}
