use http::StatusCode;

/// Reason phrase for status codes outside the standard table
pub const UNKNOWN_STATUS_TEXT: &str = "Unknown Error";

/// Standard reason phrase for a status code
///
/// Codes without a registered phrase (e.g. `599`) resolve to
/// [`UNKNOWN_STATUS_TEXT`], so the result is never empty.
#[must_use]
pub fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or(UNKNOWN_STATUS_TEXT)
}
