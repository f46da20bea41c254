//! System clock access, kept out of the core crate.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix time in seconds; 0 if the system clock predates the epoch.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
