use std::fmt::{self, Debug, Display, Formatter};

use http::StatusCode;

use crate::Failure;

type Hook<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Assertions with a hook that runs just before an abort
///
/// A scope belongs to one unit of work (usually one request). The hook
/// registered with [`Scope::on_failure`] runs at most once, synchronously,
/// right before the first failing assertion unwinds past the caller. A
/// panicking hook is not isolated: its own payload propagates in place of the
/// failure.
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// use bailout_core::{Scope, recover};
/// use http::StatusCode;
///
/// let rolled_back = AtomicBool::new(false);
///
/// let failure = recover(|| {
///     let mut scope = Scope::new();
///     scope.on_failure(|| rolled_back.store(true, Ordering::SeqCst));
///     scope.ok(false, StatusCode::BAD_REQUEST, "");
/// })
/// .unwrap_err();
///
/// assert!(rolled_back.load(Ordering::SeqCst));
/// assert_eq!(failure.status(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Default)]
pub struct Scope<'a> {
    on_failure: Option<Hook<'a>>,
}

impl<'a> Scope<'a> {
    /// Create a scope with no hook
    #[must_use]
    pub fn new() -> Self {
        Self { on_failure: None }
    }

    /// Register the hook to run before aborting, replacing any previous one
    pub fn on_failure(&mut self, hook: impl FnOnce() + Send + 'a) {
        self.on_failure = Some(Box::new(hook));
    }

    /// Abort with `status` and `message` unless `condition` holds
    ///
    /// # Panics
    ///
    /// Raises a [`Failure`] when `condition` is false.
    pub fn ok(&mut self, condition: bool, status: StatusCode, message: impl Into<String>) {
        if let Some(failure) = Failure::check(!condition, status, message) {
            self.raise(failure);
        }
    }

    /// Unwrap `result`, aborting with `status` and `message` on `Err`
    ///
    /// # Panics
    ///
    /// Raises a [`Failure`] when `result` is an error.
    pub fn success<T, E>(&mut self, result: Result<T, E>, status: StatusCode, message: impl Into<String>) -> T {
        match result {
            Ok(value) => value,
            Err(_) => self.throw(status, message),
        }
    }

    /// Unwrap `option`, aborting with `status` and `message` on `None`
    ///
    /// # Panics
    ///
    /// Raises a [`Failure`] when `option` is empty.
    pub fn some<T>(&mut self, option: Option<T>, status: StatusCode, message: impl Into<String>) -> T {
        match option {
            Some(value) => value,
            None => self.throw(status, message),
        }
    }

    /// Unwrap `result`, aborting with `500 Internal Server Error` on `Err`
    ///
    /// # Panics
    ///
    /// Raises an internal [`Failure`] when `result` is an error.
    pub fn error<T, E: Display>(&mut self, result: Result<T, E>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => self.raise(Failure::internal(e.to_string())),
        }
    }

    /// Abort unconditionally with `status` and `message`
    ///
    /// # Panics
    ///
    /// Always raises a [`Failure`].
    pub fn throw(&mut self, status: StatusCode, message: impl Into<String>) -> ! {
        self.raise(Failure::new(status, message))
    }

    fn raise(&mut self, failure: Failure) -> ! {
        if let Some(hook) = self.on_failure.take() {
            tracing::debug!(status = %failure.status(), "running failure hook");
            hook();
        }

        failure.raise()
    }
}

impl Debug for Scope<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}
