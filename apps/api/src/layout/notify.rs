//! One-shot delivery of the per-pass truncation signal.
//!
//! The callback never runs inside the layout call that produced the signal,
//! so it cannot observe a half-built result and cannot slow the pass down.

use std::sync::Arc;

use tokio::runtime::Handle;

/// Receives `true` when a layout pass cut content, `false` otherwise.
pub type TruncateCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Schedules `callback(did_truncate)` off the caller's stack.
///
/// Inside a tokio runtime the call is spawned as a task; elsewhere it runs
/// on a short-lived thread. Fire-and-forget either way.
pub fn dispatch(callback: &TruncateCallback, did_truncate: bool) {
    let callback = Arc::clone(callback);
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move { callback(did_truncate) });
        }
        Err(_) => {
            std::thread::spawn(move || callback(did_truncate));
        }
    }
}
