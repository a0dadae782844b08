//! Metric names and recorders for the store runtime.
//!
//! The runtime only emits through the `metrics` facade. Whatever recorder the
//! host installs (Prometheus, statsd, a test recorder) picks the values up;
//! without one every call is a no-op.

use metrics::{describe_counter, describe_histogram};
use std::time::Duration;

// Re-export metrics macros for use in other crates
pub use metrics::{counter, gauge, histogram};

/// Actions reduced by a store
pub const STORE_COMMANDS_TOTAL: &str = "store.commands.total";
/// Reducer execution time
pub const STORE_REDUCER_DURATION: &str = "store.reducer.duration_seconds";
/// Subscriber callbacks invoked after a transition
pub const STORE_SUBSCRIBERS_NOTIFIED: &str = "store.subscribers.notified";
/// Actions rejected because the store was shutting down
pub const STORE_REJECTED_ACTIONS: &str = "store.shutdown.rejected_actions";
/// Effect cascades aborted for exceeding the configured depth
pub const STORE_CASCADE_ABORTED: &str = "store.effects.cascade_aborted";
/// Actions accepted by a dispatcher
pub const DISPATCHER_ACTIONS_TOTAL: &str = "dispatcher.actions.total";
/// Actions dropped because the queue was gone
pub const DISPATCHER_ACTIONS_DROPPED: &str = "dispatcher.actions.dropped";

/// Register all metric descriptions with the installed recorder.
///
/// Call once after installing a recorder.
pub fn register_metrics() {
    describe_counter!(STORE_COMMANDS_TOTAL, "Total number of actions reduced by the store");
    describe_histogram!(STORE_REDUCER_DURATION, "Time taken to execute the reducer");
    describe_counter!(
        STORE_SUBSCRIBERS_NOTIFIED,
        "Total number of subscriber callbacks invoked after state transitions"
    );
    describe_counter!(
        STORE_REJECTED_ACTIONS,
        "Total number of actions rejected during shutdown"
    );
    describe_counter!(
        STORE_CASCADE_ABORTED,
        "Total number of effect cascades aborted for exceeding the depth limit"
    );
    describe_counter!(DISPATCHER_ACTIONS_TOTAL, "Total number of actions dispatched");
    describe_counter!(
        DISPATCHER_ACTIONS_DROPPED,
        "Total number of dispatched actions dropped because the queue was closed"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record a reduced action.
    pub fn record_action(duration: Duration) {
        counter!(STORE_COMMANDS_TOTAL).increment(1);
        histogram!(STORE_REDUCER_DURATION).record(duration.as_secs_f64());
    }

    /// Record subscriber notifications for one transition.
    pub fn record_notified(subscribers: usize) {
        counter!(STORE_SUBSCRIBERS_NOTIFIED).increment(subscribers as u64);
    }

    /// Record an action rejected during shutdown.
    pub fn record_rejected() {
        counter!(STORE_REJECTED_ACTIONS).increment(1);
    }

    /// Record an aborted effect cascade.
    pub fn record_cascade_aborted() {
        counter!(STORE_CASCADE_ABORTED).increment(1);
    }
}

/// Dispatcher metrics recorder.
pub struct DispatcherMetrics;

impl DispatcherMetrics {
    /// Record an accepted action.
    pub fn record_dispatched() {
        counter!(DISPATCHER_ACTIONS_TOTAL).increment(1);
    }

    /// Record an action dropped because the queue was closed.
    pub fn record_dropped() {
        counter!(DISPATCHER_ACTIONS_DROPPED).increment(1);
    }
}
