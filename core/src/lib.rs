//! # Todo Shell Core
//!
//! Core traits and types for the todo application shell.
//!
//! The shell follows a unidirectional data flow: the view reads immutable
//! snapshots of a global store and writes actions back to it. This crate
//! holds the pieces every other crate shares:
//!
//! - **Action**: Tagged description of an intended state change
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Follow-up work a reducer asks the store to perform
//! - **Subscription**: Handle for any observer registration (store, router,
//!   media queries), released explicitly or on drop
//!
//! ## Example
//!
//! ```
//! use todo_shell_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct DrawerState {
//!     opened: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum DrawerAction {
//!     Toggle,
//! }
//!
//! struct DrawerReducer;
//!
//! impl Reducer for DrawerReducer {
//!     type State = DrawerState;
//!     type Action = DrawerAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut DrawerState,
//!         action: DrawerAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<DrawerAction>; 4]> {
//!         match action {
//!             DrawerAction::Toggle => state.opened = !state.opened,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = DrawerState::default();
//! let _ = DrawerReducer.reduce(&mut state, DrawerAction::Toggle, &());
//! assert!(state.opened);
//! ```

// Re-export commonly used types
pub use smallvec::{smallvec, SmallVec};

/// Reducer composition utilities
pub mod composition;

/// Observer registration handles and listener registries
pub mod subscription;

pub use subscription::{Listener, Listeners, Subscription};

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They are the only code allowed to change store state, which keeps every
/// transition deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the store once the new snapshot is published
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Follow-up work descriptions
///
/// Effects are values returned from reducers. The store executes them after
/// the new snapshot has been published, so subscribers always observe each
/// transition individually.
pub mod effect {
    /// Effect type - describes follow-up work to be executed by the store
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action straight back into the reducer
        Dispatch(Box<Action>),

        /// Run effects in order
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> Effect<Action> {
        /// Dispatch `action` after the current transition completes
        #[must_use]
        pub fn dispatch(action: Action) -> Self {
            Effect::Dispatch(Box::new(action))
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Self {
            Effect::Sequential(effects)
        }

        /// Flatten this effect into the actions it dispatches, in order
        #[must_use]
        pub fn into_actions(self) -> Vec<Action> {
            match self {
                Effect::None => Vec::new(),
                Effect::Dispatch(action) => vec![*action],
                Effect::Sequential(effects) => {
                    effects.into_iter().flat_map(Effect::into_actions).collect()
                },
            }
        }

        /// Returns `true` if this effect does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Dispatch(_) => false,
                Effect::Sequential(effects) => effects.iter().all(Effect::is_none),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;

    #[test]
    fn sequential_effects_flatten_in_order() {
        let effect = Effect::chain(vec![
            Effect::dispatch(1),
            Effect::None,
            Effect::chain(vec![Effect::dispatch(2), Effect::dispatch(3)]),
        ]);

        assert_eq!(effect.into_actions(), vec![1, 2, 3]);
    }

    #[test]
    fn nested_none_is_none() {
        let effect: Effect<u8> = Effect::chain(vec![Effect::None, Effect::chain(vec![])]);
        assert!(effect.is_none());
        assert!(!Effect::dispatch(0_u8).is_none());
    }
}
