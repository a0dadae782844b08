//! Observer registration handles.
//!
//! Every observer registration in the shell (store subscribers, router
//! listeners, media-query watchers) hands back a [`Subscription`]. Dropping the
//! handle or calling [`Subscription::unsubscribe`] removes the observer, so a
//! component that is torn down never leaves callbacks behind.
//!
//! [`Listeners`] is the registry most observables are built on.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Callback registered with a [`Listeners`] registry
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

type Unsubscribe = Box<dyn FnOnce() + Send + Sync>;

/// Handle for an active observer registration
///
/// The registration is removed when the handle is dropped. Use
/// [`Subscription::detach`] to keep the observer alive for the lifetime of
/// the observable instead.
#[must_use = "dropping a Subscription removes the observer immediately"]
pub struct Subscription {
    unsubscribe: Option<Unsubscribe>,
}

impl Subscription {
    /// Create a subscription that runs `unsubscribe` exactly once on release
    pub fn new<F>(unsubscribe: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to release
    pub const fn empty() -> Self {
        Self { unsubscribe: None }
    }

    /// Remove the observer now
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Give up the handle without removing the observer
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }

    /// Returns `true` while the registration can still be released
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

struct Entry<T> {
    id: u64,
    listener: Listener<T>,
}

struct Registry<T> {
    next_id: AtomicU64,
    entries: Mutex<Vec<Entry<T>>>,
}

impl<T> Registry<T> {
    fn entries(&self) -> MutexGuard<'_, Vec<Entry<T>>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Listener registry lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn remove(&self, id: u64) {
        self.entries().retain(|entry| entry.id != id);
    }
}

/// Ordered registry of listeners for values of type `T`
///
/// Listeners are notified in registration order. Notification runs outside
/// the registry lock, so a listener may register or release listeners
/// (including itself) while being notified.
pub struct Listeners<T> {
    registry: Arc<Registry<T>>,
}

impl<T: 'static> Listeners<T> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(0),
                entries: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a listener
    ///
    /// The returned subscription only holds a weak reference to the
    /// registry; releasing it after the registry is gone is a no-op.
    pub fn add<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry.entries().push(Entry {
            id,
            listener: Arc::new(listener),
        });

        let registry: Weak<Registry<T>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.remove(id);
            }
        })
    }

    /// Notify every listener registered at call time; returns how many ran
    pub fn notify(&self, value: &T) -> usize {
        let listeners: Vec<Listener<T>> = self
            .registry
            .entries()
            .iter()
            .map(|entry| Arc::clone(&entry.listener))
            .collect();

        for listener in &listeners {
            listener(value);
        }

        listeners.len()
    }

    /// Number of registered listeners
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.entries().len()
    }

    /// Returns `true` if nobody is listening
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every listener
    pub fn clear(&self) {
        self.registry.entries().clear();
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.registry.entries().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&u32) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, move |_: &u32| {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn notify_reaches_every_listener() {
        let listeners = Listeners::new();
        let (first, on_first) = counter();
        let (second, on_second) = counter();

        let _a = listeners.add(on_first);
        let _b = listeners.add(on_second);

        assert_eq!(listeners.notify(&7), 2);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_subscription_removes_listener() {
        let listeners = Listeners::new();
        let (count, on_value) = counter();

        let subscription = listeners.add(on_value);
        assert_eq!(listeners.len(), 1);

        drop(subscription);
        assert!(listeners.is_empty());
        assert_eq!(listeners.notify(&1), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn detached_subscription_keeps_listener() {
        let listeners = Listeners::new();
        let (count, on_value) = counter();

        listeners.add(on_value).detach();
        listeners.notify(&1);

        assert_eq!(listeners.len(), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_after_registry_dropped_is_noop() {
        let listeners = Listeners::<u32>::new();
        let subscription = listeners.add(|_| {});
        drop(listeners);
        subscription.unsubscribe();
    }

    #[test]
    fn listener_can_release_itself_during_notify() {
        let listeners = Listeners::<u32>::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let inner = Arc::clone(&slot);

        let subscription = listeners.add(move |_| {
            if let Ok(mut guard) = inner.lock() {
                drop(guard.take());
            }
        });
        if let Ok(mut guard) = slot.lock() {
            *guard = Some(subscription);
        }

        assert_eq!(listeners.notify(&1), 1);
        assert!(listeners.is_empty());
    }
}
