use std::panic::{self, AssertUnwindSafe};
use std::pin::pin;

use futures::FutureExt;

use crate::Failure;
use crate::hook::RecoveryPoint;

/// Run `f`, catching a [`Failure`] raised anywhere inside it
///
/// Panics carrying any other payload are resumed unchanged, so genuine
/// defects keep unwinding to whoever handles them further out.
///
/// # Errors
///
/// Returns the raised failure if `f` aborted with one.
pub fn recover<F, T>(f: F) -> Result<T, Failure>
where
    F: FnOnce() -> T,
{
    let outcome = {
        let _active = RecoveryPoint::enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };

    outcome.or_else(|payload| match Failure::from_panic(payload) {
        Ok(failure) => Err(failure),
        Err(payload) => panic::resume_unwind(payload),
    })
}

/// Await `future`, catching a [`Failure`] raised while it is polled
///
/// Same contract as [`recover`]: foreign panics are resumed unchanged.
///
/// # Errors
///
/// Returns the raised failure if the future aborted with one.
pub async fn recover_async<F, T>(future: F) -> Result<T, Failure>
where
    F: Future<Output = T>,
{
    let mut caught = pin!(AssertUnwindSafe(future).catch_unwind());
    let outcome = std::future::poll_fn(|cx| {
        let _active = RecoveryPoint::enter();
        caught.as_mut().poll(cx)
    })
    .await;

    match outcome {
        Ok(value) => Ok(value),
        Err(payload) => match Failure::from_panic(payload) {
            Ok(failure) => Err(failure),
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}
