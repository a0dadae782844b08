//! The `todo-app` component.
//!
//! `AppShell` ties the store, the renderer and the host's observers
//! together:
//!
//! 1. A store subscription re-projects every snapshot into a [`ViewState`]
//!    and re-renders.
//! 2. User events (menu button, drawer, drawer header, account list) are
//!    mapped to actions and handed to a [`Dispatcher`].
//! 3. Router and media-query observers dispatch `Navigate` and
//!    `UpdateDrawerLayout` on their own.
//!
//! Every registration is held as a [`Subscription`] and released on
//! [`AppShell::unmount`] or drop.

use crate::config::ShellConfig;
use crate::document::{Metadata, MetadataSink};
use crate::error::ShellError;
use crate::media::MediaQueryWatcher;
use crate::reducer::AppStore;
use crate::render::{self, Node, RenderOptions};
use crate::router::Router;
use crate::state::{AppAction, AppState, PageId};
use crate::view::{CurrentPage, ViewState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use todo_shell_core::Subscription;
use todo_shell_runtime::Dispatcher;

/// Observers and sinks supplied by the host environment
#[derive(Clone)]
pub struct ShellHost {
    /// Source of the active page
    pub router: Arc<dyn Router>,
    /// Evaluates the responsive breakpoint
    pub media: Arc<dyn MediaQueryWatcher>,
    /// Receives document title/description updates
    pub metadata: Arc<dyn MetadataSink>,
}

/// A mounted shell
pub struct AppShell {
    component: Arc<Component>,
    subscriptions: Vec<Subscription>,
}

struct Component {
    dispatcher: Dispatcher<AppAction>,
    metadata: Arc<dyn MetadataSink>,
    options: RenderOptions,
    app_title: String,
    frame: Mutex<Frame>,
}

#[derive(Default)]
struct Frame {
    view: ViewState,
    tree: Option<Node>,
    renders: usize,
    last_patches: usize,
}

impl AppShell {
    /// Mounts the shell
    ///
    /// Subscribes to `store`, renders the current snapshot, dispatches
    /// `Navigate` for the router's active page, and starts watching the
    /// router and the responsive breakpoint. The watcher reports the current
    /// match immediately, so mounting always queues an `UpdateDrawerLayout`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidConfig`] or
    /// [`ShellError::InvalidMediaQuery`] if `config` does not validate.
    #[tracing::instrument(skip_all, name = "shell_mount")]
    pub async fn mount(
        store: &AppStore,
        dispatcher: Dispatcher<AppAction>,
        host: ShellHost,
        config: &ShellConfig,
    ) -> Result<Self, ShellError> {
        config.validate()?;

        let component = Arc::new(Component {
            dispatcher,
            metadata: host.metadata,
            options: config.render_options()?,
            app_title: config.app_title.clone(),
            frame: Mutex::new(Frame::default()),
        });

        let mut subscriptions = Vec::with_capacity(3);

        let subscriber = Arc::clone(&component);
        subscriptions.push(store.subscribe(move |snapshot: &Arc<AppState>| {
            subscriber.state_changed(snapshot.as_ref());
        }));
        let snapshot = store.snapshot().await;
        component.state_changed(&*snapshot);

        let navigator = Arc::clone(&component);
        subscriptions.push(host.router.on_page_change(Arc::new(move |page: &PageId| {
            navigator.dispatch(AppAction::Navigate { page: page.clone() });
        })));
        component.dispatch(AppAction::Navigate {
            page: host.router.active_page(),
        });

        let layout = Arc::clone(&component);
        subscriptions.push(host.media.watch(
            &config.breakpoint_query(),
            Arc::new(move |narrow: &bool| {
                layout.dispatch(AppAction::UpdateDrawerLayout { narrow: *narrow });
            }),
        ));

        tracing::info!(theme = %config.theme, "Shell mounted");
        Ok(Self {
            component,
            subscriptions,
        })
    }

    /// The menu button was activated
    pub fn menu_button_clicked(&self) {
        self.component.dispatch(AppAction::ToggleDrawer);
    }

    /// The drawer reported a new open state
    pub fn drawer_opened_changed(&self, opened: bool) {
        self.component.dispatch(AppAction::UpdateDrawerState { opened });
    }

    /// The drawer header (active account) was activated
    pub fn drawer_header_clicked(&self) {
        self.component.dispatch(AppAction::ToggleAccountSelector);
    }

    /// An account in the account list was chosen
    pub fn account_selected(&self, email: impl Into<String>) {
        self.component.dispatch(AppAction::SelectAccount { email: email.into() });
    }

    /// View state from the last snapshot
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.component.frame().view.clone()
    }

    /// Last committed tree
    #[must_use]
    pub fn tree(&self) -> Node {
        self.component
            .frame()
            .tree
            .clone()
            .unwrap_or_else(|| render::render(&ViewState::default(), &self.component.options))
    }

    /// Last committed tree as markup
    #[must_use]
    pub fn to_html(&self) -> String {
        self.tree().to_html()
    }

    /// Number of render passes so far
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.component.frame().renders
    }

    /// Number of patches the last render pass produced
    #[must_use]
    pub fn last_patch_count(&self) -> usize {
        self.component.frame().last_patches
    }

    /// Releases every registration
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.subscriptions.is_empty() {
            tracing::debug!(subscriptions = self.subscriptions.len(), "Shell unmounted");
        }
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for AppShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppShell")
            .field("options", &self.component.options)
            .field("subscriptions", &self.subscriptions.len())
            .field("renders", &self.render_count())
            .finish_non_exhaustive()
    }
}

impl Component {
    fn dispatch(&self, action: AppAction) {
        tracing::debug!(action = action.kind(), "Dispatching");
        self.dispatcher.dispatch(action);
    }

    fn frame(&self) -> MutexGuard<'_, Frame> {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Projects, renders, and commits one snapshot
    fn state_changed(&self, state: &AppState) {
        let view = ViewState::project(state);
        let tree = render::render(&view, &self.options);

        let page_changed = {
            let mut frame = self.frame();
            let frame = &mut *frame;
            frame.renders += 1;

            match frame.tree.as_mut() {
                Some(committed) => {
                    let patches = render::diff(committed, &tree);
                    frame.last_patches = patches.len();
                    if patches.is_empty() {
                        tracing::trace!("Render produced no patches, skipping commit");
                    } else if let Err(error) = render::apply(committed, &patches) {
                        tracing::warn!(%error, "Patch failed, replacing tree");
                        *committed = tree;
                    }
                },
                None => {
                    frame.last_patches = 1;
                    frame.tree = Some(tree);
                },
            }

            let page_changed = frame.view.current_page != view.current_page;
            frame.view = view.clone();
            page_changed
        };

        if page_changed {
            self.page_changed(view.current_page.as_ref());
        }
    }

    fn page_changed(&self, page: Option<&CurrentPage>) {
        let Some(page) = page else {
            tracing::debug!("Page cleared, keeping document metadata");
            return;
        };
        self.metadata
            .update_metadata(&Metadata::for_page(&self.app_title, &page.title));
    }
}
