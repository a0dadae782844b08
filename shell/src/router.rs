//! Path-based routing to page ids.

use crate::state::{Page, PageId};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use todo_shell_core::{Listener, Listeners, Subscription};

/// Source of the active page
pub trait Router: Send + Sync {
    /// Page the router currently points at
    fn active_page(&self) -> PageId;

    /// Calls `listener` with the new page id every time the active page
    /// changes, until the subscription is released.
    fn on_page_change(&self, listener: Listener<PageId>) -> Subscription;
}

/// In-memory history router
///
/// Maps paths to page ids; unknown paths resolve to the not-found page.
/// Clones share the same history and listeners.
#[derive(Clone)]
pub struct HistoryRouter {
    routes: Arc<Vec<(String, PageId)>>,
    not_found: PageId,
    history: Arc<Mutex<Vec<PageId>>>,
    listeners: Listeners<PageId>,
}

impl HistoryRouter {
    /// Creates a router over `routes`, starting at `initial_path`
    #[must_use]
    pub fn new(routes: Vec<(String, PageId)>, not_found: PageId, initial_path: &str) -> Self {
        let router = Self {
            routes: Arc::new(routes),
            not_found,
            history: Arc::new(Mutex::new(Vec::new())),
            listeners: Listeners::new(),
        };
        let initial = router.resolve(initial_path);
        router.history().push(initial);
        router
    }

    /// Creates a router with one route per page
    #[must_use]
    pub fn from_pages(pages: &[Page], not_found: PageId, initial_path: &str) -> Self {
        let routes = pages
            .iter()
            .map(|page| (page.path.clone(), page.id.clone()))
            .collect();
        Self::new(routes, not_found, initial_path)
    }

    /// Page id for `path`
    ///
    /// Query strings, fragments and trailing slashes are ignored.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PageId {
        let path = normalize(path);
        self.routes
            .iter()
            .find(|(route, _)| normalize(route) == path)
            .map_or_else(|| self.not_found.clone(), |(_, id)| id.clone())
    }

    /// Navigates to `path`
    ///
    /// Listeners are notified only if the active page changes.
    pub fn go(&self, path: &str) -> PageId {
        let page = self.resolve(path);
        let changed = {
            let mut history = self.history();
            let changed = history.last() != Some(&page);
            if changed {
                history.push(page.clone());
            }
            changed
        };

        if changed {
            tracing::debug!(path, %page, "Route changed");
            self.listeners.notify(&page);
        }
        page
    }

    /// Returns to the previous page, if any
    pub fn back(&self) -> Option<PageId> {
        let page = {
            let mut history = self.history();
            if history.len() < 2 {
                return None;
            }
            history.pop();
            history.last().cloned()?
        };

        tracing::debug!(%page, "Route changed (back)");
        self.listeners.notify(&page);
        Some(page)
    }

    /// Number of entries in the history stack
    #[must_use]
    pub fn depth(&self) -> usize {
        self.history().len()
    }

    fn history(&self) -> std::sync::MutexGuard<'_, Vec<PageId>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

impl Router for HistoryRouter {
    fn active_page(&self) -> PageId {
        self.history()
            .last()
            .cloned()
            .unwrap_or_else(|| self.not_found.clone())
    }

    fn on_page_change(&self, listener: Listener<PageId>) -> Subscription {
        self.listeners.add(move |page: &PageId| listener(page))
    }
}

impl fmt::Debug for HistoryRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryRouter")
            .field("routes", &self.routes.len())
            .field("active", &self.active_page())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
