//! Snapshot capture for store-driven tests.

#![allow(clippy::module_name_repetitions)]

use std::sync::{Arc, Mutex, PoisonError};
use todo_shell_core::{reducer::Reducer, Subscription};
use todo_shell_runtime::Store;

/// Records every snapshot a store publishes while attached
///
/// The recorder holds its own store subscription and releases it on drop.
pub struct SnapshotRecorder<S> {
    snapshots: Arc<Mutex<Vec<Arc<S>>>>,
    _subscription: Subscription,
}

impl<S> SnapshotRecorder<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Subscribe to `store` and start recording
    pub fn attach<A, E, R>(store: &Store<S, A, E, R>) -> Self
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        E: Send + Sync + 'static,
    {
        let snapshots = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&snapshots);
        let subscription = store.subscribe(move |snapshot| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(Arc::clone(snapshot));
        });

        Self {
            snapshots,
            _subscription: subscription,
        }
    }

    /// Number of snapshots published so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been published yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent snapshot
    #[must_use]
    pub fn last(&self) -> Option<Arc<S>> {
        self.lock().last().cloned()
    }

    /// Every snapshot recorded so far, oldest first
    #[must_use]
    pub fn snapshots(&self) -> Vec<Arc<S>> {
        self.lock().clone()
    }

    /// Project every recorded snapshot through `f`
    pub fn map<T>(&self, f: impl FnMut(&S) -> T) -> Vec<T> {
        self.lock().iter().map(|snapshot| snapshot.as_ref()).map(f).collect()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<S>>> {
        self.snapshots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_shell_core::{effect::Effect, smallvec, SmallVec};

    #[derive(Clone, Debug, Default)]
    struct Selector {
        opened: bool,
    }

    struct SelectorReducer;

    impl Reducer for SelectorReducer {
        type State = Selector;
        type Action = ();
        type Environment = ();

        fn reduce(&self, state: &mut Selector, _action: (), _env: &()) -> SmallVec<[Effect<()>; 4]> {
            state.opened = !state.opened;
            smallvec![Effect::None]
        }
    }

    #[tokio::test]
    async fn records_every_published_snapshot() {
        let store = Store::new(Selector::default(), SelectorReducer, ());
        let recorder = SnapshotRecorder::attach(&store);
        assert!(recorder.is_empty());

        store.send(()).await.unwrap();
        store.send(()).await.unwrap();

        assert_eq!(recorder.map(|s| s.opened), vec![true, false]);
        assert!(!recorder.last().unwrap().opened);

        recorder.clear();
        assert!(recorder.is_empty());
    }

    #[tokio::test]
    async fn dropping_recorder_unsubscribes() {
        let store = Store::new(Selector::default(), SelectorReducer, ());
        let recorder = SnapshotRecorder::attach(&store);
        assert_eq!(store.subscriber_count(), 1);

        drop(recorder);
        assert_eq!(store.subscriber_count(), 0);
    }
}
