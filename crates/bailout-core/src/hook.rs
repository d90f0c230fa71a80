//! Panic hook integration
//!
//! Raising a [`Failure`] is ordinary control flow, but the default panic hook
//! still prints a "thread panicked" report for it. [`install`] chains a hook in
//! front of the current one that reports recovered failures at debug level.
//! A failure raised with no recovery point on the stack, and every other
//! panic, goes to the previous hook.

use std::cell::Cell;
use std::panic;
use std::sync::Once;

use crate::Failure;

static INSTALL: Once = Once::new();

thread_local! {
    static ACTIVE_RECOVERY_POINTS: Cell<usize> = const { Cell::new(0) };
}

/// Marks the current thread as running under a recovery point
///
/// Held by [`crate::recover`] for the whole call and by
/// [`crate::recover_async`] for each poll, so a task moved to another worker
/// thread is tracked on whichever thread polls it.
pub(crate) struct RecoveryPoint(());

impl RecoveryPoint {
    pub(crate) fn enter() -> Self {
        ACTIVE_RECOVERY_POINTS.with(|depth| depth.set(depth.get() + 1));
        Self(())
    }
}

impl Drop for RecoveryPoint {
    fn drop(&mut self) {
        ACTIVE_RECOVERY_POINTS.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Whether a failure raised on this thread right now would be caught
pub(crate) fn is_recovering() -> bool {
    ACTIVE_RECOVERY_POINTS.with(Cell::get) > 0
}

/// Install the failure-aware panic hook
///
/// Idempotent: only the first call per process replaces the hook.
pub fn install() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();

        panic::set_hook(Box::new(move |info| {
            if let Some(failure) = info.payload().downcast_ref::<Failure>() {
                if is_recovering() {
                    tracing::debug!(
                        status = %failure.status(),
                        reason = failure.message(),
                        location = ?info.location(),
                        "request aborted"
                    );
                    return;
                }

                tracing::error!(
                    status = %failure.status(),
                    reason = failure.message(),
                    location = ?info.location(),
                    "failure raised outside any recovery point"
                );
            }

            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use std::panic::AssertUnwindSafe;

    use http::StatusCode;

    use super::*;
    use crate::{assert, recover};

    #[test]
    fn failures_still_unwind_after_install() {
        install();
        install();

        let failure = recover(|| assert::throw(StatusCode::TOO_MANY_REQUESTS, "")).unwrap_err();
        assert_eq!(failure.message(), "Too Many Requests");

        let payload = panic::catch_unwind(AssertUnwindSafe(|| panic::panic_any(1_i64))).unwrap_err();
        assert_eq!(payload.downcast_ref::<i64>(), Some(&1));
    }

    #[test]
    fn recovery_points_nest() {
        assert!(!is_recovering());
        {
            let _outer = RecoveryPoint::enter();
            {
                let _inner = RecoveryPoint::enter();
                assert!(is_recovering());
            }
            assert!(is_recovering());
        }
        assert!(!is_recovering());
    }

    #[test]
    fn recovery_point_is_released_after_failure() {
        let _ = recover(|| {
            assert!(is_recovering());
            assert::throw(StatusCode::BAD_REQUEST, "");
        });
        assert!(!is_recovering());
    }
}
