//! # Todo Shell Runtime
//!
//! Runtime implementation of the global store the shell reads from and
//! writes to.
//!
//! ## Core Components
//!
//! - **Store**: Holds the current immutable snapshot, runs the reducer as the
//!   sole writer, and publishes every new snapshot to subscribers
//! - **Dispatcher / `ActionQueue`**: Fire-and-forget action submission from UI
//!   callbacks, forwarded to the store in FIFO order
//!
//! ## Example
//!
//! ```ignore
//! use todo_shell_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! let subscription = store.subscribe(|snapshot| {
//!     println!("drawer opened: {}", snapshot.drawer.opened);
//! });
//!
//! store.send(AppAction::ToggleDrawer).await?;
//! subscription.unsubscribe();
//! ```

use std::sync::Arc;
use std::time::Duration;
use todo_shell_core::reducer::Reducer;
use tokio::sync::RwLock;

/// Metric names and recorders
pub mod metrics;

/// Fire-and-forget action dispatch
pub mod dispatcher;

pub use dispatcher::{ActionQueue, Dispatcher};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// Returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Effects kept feeding actions back past the configured limit
        ///
        /// Every transition up to the limit has already been applied and
        /// published; only the remaining follow-up actions were discarded.
        #[error("Effect cascade exceeded {0} follow-up actions")]
        CascadeLimit(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todo_shell_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_cascade(8);
/// assert_eq!(config.max_cascade, 8);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of follow-up actions a single `send` may trigger
    pub max_cascade: usize,
    /// Reducer runs slower than this are logged at `warn`
    pub slow_reducer_threshold: Duration,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_cascade: usize, slow_reducer_threshold: Duration) -> Self {
        Self {
            max_cascade,
            slow_reducer_threshold,
        }
    }

    /// Set the follow-up action limit
    #[must_use]
    pub const fn with_max_cascade(mut self, max_cascade: usize) -> Self {
        self.max_cascade = max_cascade;
        self
    }

    /// Set the slow reducer warning threshold
    #[must_use]
    pub const fn with_slow_reducer_threshold(mut self, threshold: Duration) -> Self {
        self.slow_reducer_threshold = threshold;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_cascade: 32,
            slow_reducer_threshold: Duration::from_millis(16),
        }
    }
}

/// Store implementation
pub mod store {
    use super::{Arc, Reducer, RwLock, StoreConfig, StoreError};
    use crate::metrics::StoreMetrics;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use todo_shell_core::{Listeners, Subscription};
    use tokio::sync::Mutex;

    /// The Store - single writer over an immutable state snapshot
    ///
    /// The Store manages:
    /// 1. The current snapshot (`Arc<S>`, replaced on every transition)
    /// 2. Reducer (the only code allowed to produce a new snapshot)
    /// 3. Environment (injected dependencies)
    /// 4. Subscribers, notified with each new snapshot in transition order
    ///
    /// Cloning a Store is cheap; clones share state and subscribers.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<Arc<S>>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
        subscribers: Listeners<Arc<S>>,
        /// Serializes whole transitions so subscribers see snapshots in order
        send_gate: Arc<Mutex<()>>,
        shutdown: Arc<AtomicBool>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Clone + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            Self {
                state: Arc::new(RwLock::new(Arc::new(initial_state))),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
                subscribers: Listeners::new(),
                send_gate: Arc::new(Mutex::new(())),
                shutdown: Arc::new(AtomicBool::new(false)),
            }
        }

        /// Send an action to the store
        ///
        /// The action is reduced under the write lock; the resulting snapshot
        /// is published to every subscriber after the lock is released. Any
        /// `Effect::Dispatch` actions are then reduced the same way, in
        /// order, each producing its own snapshot and notification.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if the store is shutting down.
        /// - [`StoreError::CascadeLimit`] if effects keep feeding actions back
        ///   past [`StoreConfig::max_cascade`].
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                StoreMetrics::record_rejected();
                return Err(StoreError::ShutdownInProgress);
            }

            let _gate = self.send_gate.lock().await;
            let mut pending = VecDeque::from([action]);
            let mut follow_ups = 0_usize;

            while let Some(action) = pending.pop_front() {
                let (snapshot, effects) = {
                    let mut state = self.state.write().await;
                    tracing::trace!("Acquired write lock on state");

                    let start = std::time::Instant::now();
                    let effects = self.reducer.reduce(Arc::make_mut(&mut state), action, &self.environment);
                    let elapsed = start.elapsed();
                    StoreMetrics::record_action(elapsed);

                    if elapsed > self.config.slow_reducer_threshold {
                        tracing::warn!(?elapsed, "Slow reducer execution");
                    }

                    (Arc::clone(&state), effects)
                };

                let notified = self.subscribers.notify(&snapshot);
                StoreMetrics::record_notified(notified);
                tracing::trace!(notified, effects = effects.len(), "Published snapshot");

                for effect in effects {
                    for follow_up in effect.into_actions() {
                        follow_ups += 1;
                        if follow_ups > self.config.max_cascade {
                            tracing::error!(
                                limit = self.config.max_cascade,
                                "Effect cascade limit exceeded, discarding remaining actions"
                            );
                            StoreMetrics::record_cascade_aborted();
                            return Err(StoreError::CascadeLimit(self.config.max_cascade));
                        }
                        pending.push_back(follow_up);
                    }
                }
            }

            tracing::debug!(follow_ups, "Action processing completed");
            Ok(())
        }

        /// Register a callback invoked with every new snapshot
        ///
        /// The callback is not invoked for the current snapshot; read it
        /// with [`Store::snapshot`] when needed. Callbacks run synchronously
        /// after each transition and must not block.
        pub fn subscribe<F>(&self, callback: F) -> Subscription
        where
            F: Fn(&Arc<S>) + Send + Sync + 'static,
        {
            tracing::debug!(subscribers = self.subscribers.len() + 1, "Subscriber registered");
            self.subscribers.add(callback)
        }

        /// Current snapshot
        pub async fn snapshot(&self) -> Arc<S> {
            Arc::clone(&*self.state.read().await)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let opened = store.state(|s| s.drawer.opened).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Number of registered subscribers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.subscribers.len()
        }

        /// Stop accepting actions and drop every subscriber
        pub fn shutdown(&self) {
            if !self.shutdown.swap(true, Ordering::AcqRel) {
                tracing::info!(subscribers = self.subscribers.len(), "Store shutting down");
                self.subscribers.clear();
            }
        }

        /// Returns `true` once [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Access the injected environment
        #[must_use]
        pub fn environment(&self) -> &E {
            &self.environment
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config.clone(),
                subscribers: self.subscribers.clone(),
                send_gate: Arc::clone(&self.send_gate),
                shutdown: Arc::clone(&self.shutdown),
            }
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("config", &self.config)
                .field("subscribers", &self.subscribers)
                .field("shutdown", &self.shutdown.load(Ordering::Acquire))
                .finish_non_exhaustive()
        }
    }
}

// Re-export for convenience
pub use store::Store;
