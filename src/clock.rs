//! Wall-clock acquisition, isolated behind a single function per the
//! external-collaborator contract: the cache core never calls
//! `SystemTime::now()` directly, so tests can drive exact timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time, in whole seconds since the Unix epoch.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs()
}
