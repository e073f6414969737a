// Metrics hooks for lookup observability.
//
// Callers install a global `LookupMetrics` implementation via
// [`set_lookup_metrics`], then every `CompiledMatcher::lookup` reports the
// resolved language, whether a rule matched, and the wall-clock latency.
// This keeps instrumentation decoupled from any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for lookup operations.
pub trait LookupMetrics: Send + Sync {
    /// Record the outcome of one lookup.
    ///
    /// `accept_language` is the raw input value, `resolved` is the
    /// language name or alias returned to the caller, `matched` is false
    /// when the default language was used as a fallback, and `latency` is
    /// the wall-clock duration of the lookup.
    fn record_lookup(
        &self,
        accept_language: &str,
        resolved: &str,
        matched: bool,
        latency: Duration,
    );
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn LookupMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn LookupMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn LookupMetrics>> {
    let guard = metrics_lock().read().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global lookup metrics recorder.
///
/// This is typically called once during service startup so all matchers
/// share the same metrics backend.
pub fn set_lookup_metrics(recorder: Option<Arc<dyn LookupMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().expect("lookup metrics lock poisoned");
    *guard = recorder;
}
