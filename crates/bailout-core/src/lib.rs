#![allow(clippy::must_use_candidate)]

//! Structured request aborts
//!
//! Handlers assert their preconditions and bail out of the current call
//! stack with a [`Failure`] carrying an HTTP status and a message. The
//! failure travels as a panic payload up to the nearest recovery point
//! ([`recover`], [`recover_async`], or the server's recovery boundary), which
//! turns it into a response. Panics with any other payload pass through
//! recovery points untouched.
//!
//! ```
//! use bailout_core::{assert, recover};
//! use http::StatusCode;
//!
//! let result = recover(|| {
//!     let username = "";
//!     assert::ok(!username.is_empty(), StatusCode::BAD_REQUEST, "No username given");
//! });
//!
//! let failure = result.unwrap_err();
//! assert_eq!(failure.status(), StatusCode::BAD_REQUEST);
//! assert_eq!(failure.message(), "No username given");
//! ```

pub mod assert;
mod failure;
pub mod hook;
mod recover;
mod scope;
mod status;

pub use assert::OrFail;
pub use failure::Failure;
pub use recover::{recover, recover_async};
pub use scope::Scope;
pub use status::{UNKNOWN_STATUS_TEXT, status_text};
