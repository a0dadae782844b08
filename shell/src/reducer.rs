//! Reducers for the shell's actions.
//!
//! `AppReducer` is the combination of three narrower reducers: navigation
//! works on the whole state, while the drawer and account reducers are
//! scoped to their own slice.

use crate::state::{AccountState, AppAction, AppState, DrawerState, PageId};
use todo_shell_core::{
    composition::{combine_reducers, scope_reducer, BoxedReducer, CombinedReducer},
    effect::Effect,
    reducer::Reducer,
    smallvec, SmallVec,
};
use todo_shell_runtime::Store;

/// Store type used by the shell
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Environment for the app reducers
#[derive(Clone, Debug)]
pub struct AppEnvironment {
    /// Page shown for unknown page ids
    pub not_found: PageId,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub const fn new(not_found: PageId) -> Self {
        Self { not_found }
    }
}

impl Default for AppEnvironment {
    fn default() -> Self {
        Self::new(PageId::new("view404"))
    }
}

/// Resolves `Navigate` to a page descriptor
#[derive(Clone, Debug, Default)]
pub struct NavigationReducer;

impl Reducer for NavigationReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let AppAction::Navigate { page } = action else {
            return SmallVec::new();
        };

        let resolved = state
            .page_by_id(&page)
            .or_else(|| state.page_by_id(&env.not_found))
            .cloned();

        if resolved.is_none() {
            tracing::warn!(%page, not_found = %env.not_found, "No page to navigate to");
        } else if resolved.as_ref().is_some_and(|p| p.id != page) {
            tracing::debug!(%page, "Unknown page, showing not-found page");
        }
        state.page = resolved;

        // A narrow drawer overlays the content, so it closes on navigation.
        if state.drawer.narrow && state.drawer.opened {
            return smallvec![Effect::dispatch(AppAction::UpdateDrawerState { opened: false })];
        }

        SmallVec::new()
    }
}

/// Drawer open/narrow flags
#[derive(Clone, Debug, Default)]
pub struct DrawerReducer;

impl Reducer for DrawerReducer {
    type State = DrawerState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::ToggleDrawer => state.opened = !state.opened,
            AppAction::UpdateDrawerState { opened } => state.opened = opened,
            AppAction::UpdateDrawerLayout { narrow } => state.narrow = narrow,
            AppAction::Navigate { .. }
            | AppAction::ToggleAccountSelector
            | AppAction::SelectAccount { .. } => {},
        }
        SmallVec::new()
    }
}

/// Account selector and active account
#[derive(Clone, Debug, Default)]
pub struct AccountReducer;

impl Reducer for AccountReducer {
    type State = AccountState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::ToggleAccountSelector => {
                state.selector_opened = !state.selector_opened;
            },
            AppAction::SelectAccount { email } => {
                let Some(selected) = state.find(&email).cloned() else {
                    tracing::warn!(%email, "Ignoring unknown account");
                    return SmallVec::new();
                };
                // The previously active account takes the selected one's slot.
                let previous = std::mem::replace(&mut state.active, selected);
                if let Some(slot) = state.available.iter_mut().find(|a| a.email == email) {
                    *slot = previous;
                }
                state.selector_opened = false;
            },
            AppAction::Navigate { .. }
            | AppAction::ToggleDrawer
            | AppAction::UpdateDrawerState { .. }
            | AppAction::UpdateDrawerLayout { .. } => {},
        }
        SmallVec::new()
    }
}

/// Root reducer for [`AppState`]
pub struct AppReducer {
    inner: CombinedReducer<AppState, AppAction, AppEnvironment>,
}

impl AppReducer {
    /// Creates the combined app reducer
    #[must_use]
    pub fn new() -> Self {
        let reducers: Vec<BoxedReducer<AppState, AppAction, AppEnvironment>> = vec![
            Box::new(NavigationReducer),
            Box::new(scope_reducer(
                DrawerReducer,
                |s: &AppState| &s.drawer,
                |s: &mut AppState, drawer: DrawerState| s.drawer = drawer,
            )),
            Box::new(scope_reducer(
                AccountReducer,
                |s: &AppState| &s.accounts,
                |s: &mut AppState, accounts: AccountState| s.accounts = accounts,
            )),
        ];
        Self {
            inner: combine_reducers(reducers),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppReducer")
            .field("reducers", &self.inner.len())
            .finish()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(action = action.kind(), "Reducing");
        self.inner.reduce(state, action, env)
    }
}
