//! Reducer composition utilities
//!
//! - **`combine_reducers`**: Run several reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one slice of a larger state
//!
//! # Example
//!
//! ```
//! use todo_shell_core::composition::{combine_reducers, scope_reducer};
//! use todo_shell_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct Drawer {
//!     opened: bool,
//! }
//!
//! #[derive(Clone, Default)]
//! struct Shell {
//!     drawer: Drawer,
//!     title: String,
//! }
//!
//! #[derive(Clone)]
//! enum ShellAction {
//!     ToggleDrawer,
//!     Rename(String),
//! }
//!
//! struct DrawerReducer;
//!
//! impl Reducer for DrawerReducer {
//!     type State = Drawer;
//!     type Action = ShellAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Drawer, action: ShellAction, _env: &()) -> SmallVec<[Effect<ShellAction>; 4]> {
//!         if matches!(action, ShellAction::ToggleDrawer) {
//!             state.opened = !state.opened;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! struct TitleReducer;
//!
//! impl Reducer for TitleReducer {
//!     type State = Shell;
//!     type Action = ShellAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Shell, action: ShellAction, _env: &()) -> SmallVec<[Effect<ShellAction>; 4]> {
//!         if let ShellAction::Rename(title) = action {
//!             state.title = title;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let reducer = combine_reducers(vec![
//!     Box::new(scope_reducer(
//!         DrawerReducer,
//!         |shell: &Shell| &shell.drawer,
//!         |shell: &mut Shell, drawer: Drawer| shell.drawer = drawer,
//!     )),
//!     Box::new(TitleReducer),
//! ]);
//!
//! let mut state = Shell::default();
//! let _ = reducer.reduce(&mut state, ShellAction::ToggleDrawer, &());
//! let _ = reducer.reduce(&mut state, ShellAction::Rename("Inbox".into()), &());
//! assert!(state.drawer.opened);
//! assert_eq!(state.title, "Inbox");
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Boxed reducer over a shared state/action/environment triple
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer runs in the order given and sees the state left by the
/// previous one. Effects are concatenated in the same order. `Effect::None`
/// entries are dropped so callers can test for an empty effect list.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Number of reducers in this combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns `true` if no reducers were combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects.into_iter().filter(|effect| !effect.is_none()));
        }

        all_effects
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// The slice is cloned out, reduced, and written back, so the child reducer
/// never sees the parent type.
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<fn() -> (A, E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut sub_state = (self.get_state)(state).clone();
        let effects = self.reducer.reduce(&mut sub_state, action, env);
        (self.set_state)(state, sub_state);
        effects
    }
}
