//! Session-level id for correlating log lines from one GUI session.
//!
//! A single ULID is generated at first access and shared by every flow in
//! the process. Individual store submissions additionally log a fresh
//! request id from [`generate`], so a retried proposal can be told apart
//! from its first attempt.

use once_cell::sync::Lazy;
use ulid::Ulid;

static SESSION_ID: Lazy<String> = Lazy::new(|| Ulid::new().to_string());

/// Returns the process-level session id (same value for the whole process).
/// ULIDs are 26 chars, URL-safe and sort by creation time.
#[inline]
pub fn get() -> &'static str {
    &SESSION_ID
}

/// Generates a fresh ULID for a single store call.
#[inline]
pub fn generate() -> String {
    Ulid::new().to_string()
}
