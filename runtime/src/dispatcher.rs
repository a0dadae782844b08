//! Fire-and-forget action dispatch.
//!
//! UI callbacks (button handlers, router listeners, media-query watchers) are
//! synchronous and must never wait on the store. They hold a [`Dispatcher`]
//! and push actions into an unbounded queue; the [`ActionQueue`] side forwards
//! those actions to the [`Store`] one at a time, in the order they were
//! dispatched.

use crate::metrics::DispatcherMetrics;
use crate::{Store, StoreError};
use todo_shell_core::reducer::Reducer;
use tokio::sync::mpsc;

/// Create a connected dispatcher/queue pair
#[must_use]
pub fn channel<A>() -> (Dispatcher<A>, ActionQueue<A>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Dispatcher { tx }, ActionQueue { rx })
}

/// Sending half: cheap to clone, safe to call from any callback
#[derive(Debug)]
pub struct Dispatcher<A> {
    tx: mpsc::UnboundedSender<A>,
}

impl<A> Dispatcher<A> {
    /// Queue an action for the store
    ///
    /// Returns `false` if the queue has been closed and the action was
    /// dropped. There is no acknowledgement beyond that.
    pub fn dispatch(&self, action: A) -> bool {
        if self.tx.send(action).is_ok() {
            DispatcherMetrics::record_dispatched();
            true
        } else {
            tracing::warn!("Dropped action: dispatch queue closed");
            DispatcherMetrics::record_dropped();
            false
        }
    }

    /// Returns `true` once the receiving queue is gone
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

/// Receiving half: drains dispatched actions into a store
#[derive(Debug)]
pub struct ActionQueue<A> {
    rx: mpsc::UnboundedReceiver<A>,
}

impl<A> ActionQueue<A> {
    /// Take the next queued action without waiting
    pub fn try_next(&mut self) -> Option<A> {
        self.rx.try_recv().ok()
    }

    /// Take every action queued so far, in dispatch order
    pub fn drain_pending(&mut self) -> Vec<A> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Wait for the next action; `None` once every dispatcher is dropped
    pub async fn next(&mut self) -> Option<A> {
        self.rx.recv().await
    }

    /// Stop accepting new actions; already queued actions stay readable
    pub fn close(&mut self) {
        self.rx.close();
    }

    /// Send every queued action to `store`, including actions dispatched
    /// while earlier ones were being processed. Returns how many were sent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down; actions not yet sent stay queued. A [`StoreError::CascadeLimit`]
    /// is logged and does not stop the flush.
    pub async fn flush<S, E, R>(&mut self, store: &Store<S, A, E, R>) -> Result<usize, StoreError>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Clone + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        let mut sent = 0;
        loop {
            if store.is_shutting_down() {
                if !self.rx.is_empty() {
                    tracing::warn!(sent, "Store shut down mid-flush, leaving actions queued");
                }
                return Err(StoreError::ShutdownInProgress);
            }
            let Some(action) = self.try_next() else {
                break;
            };
            forward(store, action).await?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Forward actions to `store` until every dispatcher is dropped
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store shuts down
    /// while the queue is still live.
    pub async fn run<S, E, R>(mut self, store: Store<S, A, E, R>) -> Result<(), StoreError>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Clone + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        tracing::debug!("Action queue running");
        while let Some(action) = self.next().await {
            forward(&store, action).await?;
        }
        tracing::debug!("All dispatchers dropped, action queue stopped");
        Ok(())
    }
}

async fn forward<S, A, E, R>(store: &Store<S, A, E, R>, action: A) -> Result<(), StoreError>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + 'static,
    S: Clone + Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    match store.send(action).await {
        Err(StoreError::CascadeLimit(limit)) => {
            tracing::error!(limit, "Dispatched action triggered a runaway effect cascade");
            Ok(())
        },
        Err(StoreError::ShutdownInProgress) => {
            tracing::warn!("Dropped dispatched action: store is shutting down");
            DispatcherMetrics::record_dropped();
            Err(StoreError::ShutdownInProgress)
        },
        Ok(()) => Ok(()),
    }
}
