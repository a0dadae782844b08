//! # Todo Shell Testing
//!
//! Testing utilities and helpers for the todo shell.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Effect assertion helpers
//! - [`SnapshotRecorder`]: Captures every snapshot a store publishes
//! - [`helpers::init_test_tracing`]: Routes `tracing` output to the test writer
//!
//! ## Example
//!
//! ```ignore
//! use todo_shell_testing::SnapshotRecorder;
//!
//! #[tokio::test]
//! async fn drawer_toggles() {
//!     let store = Store::new(AppState::default(), AppReducer::new(), env);
//!     let recorder = SnapshotRecorder::attach(&store);
//!
//!     store.send(AppAction::ToggleDrawer).await.unwrap();
//!
//!     assert_eq!(recorder.len(), 1);
//!     assert!(recorder.last().unwrap().drawer.opened);
//! }
//! ```

mod recorder;
mod reducer_test;

pub use recorder::SnapshotRecorder;
pub use reducer_test::{assertions, ReducerTest};

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs anything.
    /// The filter honours `RUST_LOG` and defaults to `debug`.
    pub fn init_test_tracing() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_test_tracing_is_idempotent() {
        super::helpers::init_test_tracing();
        super::helpers::init_test_tracing();
    }
}
