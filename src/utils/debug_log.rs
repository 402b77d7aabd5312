//! Opt-in per-request debug lines.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, warn};

use crate::config::SdkSettings;

/// `tracing` target used when no custom sink is configured.
pub const DEBUG_TARGET: &str = "playht_stream::debug";

/// Emits `message` when debug logging is enabled in `settings`.
///
/// Lines go to the configured sink, or to `tracing` at debug level on
/// [`DEBUG_TARGET`]. A panicking sink is contained and reported as a warning.
pub fn debug_log(settings: &SdkSettings, message: &str) {
    if !settings.debug.enabled {
        return;
    }

    match &settings.debug.sink {
        Some(sink) => {
            if catch_unwind(AssertUnwindSafe(|| sink(message))).is_err() {
                warn!("Debug log sink panicked; line dropped");
            }
        }
        None => debug!(target: DEBUG_TARGET, "{message}"),
    }
}
