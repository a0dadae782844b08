//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use todo_shell_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use todo_shell_testing::{assertions, ReducerTest};
///
/// ReducerTest::new(AppReducer::new())
///     .with_env(AppEnvironment::default())
///     .given_state(AppState::default())
///     .when_action(AppAction::ToggleDrawer)
///     .then_state(|state| assert!(state.drawer.opened))
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an action to reduce (When)
    ///
    /// Actions run in the order they were added. Effect assertions see the
    /// effects of the last action only.
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use todo_shell_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect does something.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that the effects dispatch exactly `expected`, in order
    ///
    /// # Panics
    ///
    /// Panics if the dispatched actions differ.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_dispatches<A>(effects: &[Effect<A>], expected: &[A])
    where
        A: Clone + PartialEq + std::fmt::Debug,
    {
        let dispatched: Vec<A> = effects
            .iter()
            .cloned()
            .flat_map(Effect::into_actions)
            .collect();
        assert_eq!(dispatched, expected, "Unexpected dispatched actions");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_shell_core::{smallvec, SmallVec};

    #[derive(Clone, Debug)]
    struct TestState {
        opened: bool,
        narrow: bool,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Toggle,
        Close,
        SetNarrow(bool),
    }

    struct TestReducer;

    struct TestEnv;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Toggle => {
                    state.opened = !state.opened;
                    if state.opened && state.narrow {
                        return smallvec![Effect::dispatch(TestAction::Close)];
                    }
                    smallvec![Effect::None]
                },
                TestAction::Close => {
                    state.opened = false;
                    smallvec![Effect::None]
                },
                TestAction::SetNarrow(narrow) => {
                    state.narrow = narrow;
                    SmallVec::new()
                },
            }
        }
    }

    fn closed() -> TestState {
        TestState {
            opened: false,
            narrow: false,
        }
    }

    #[test]
    fn test_reducer_test_toggle() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(closed())
            .when_action(TestAction::Toggle)
            .then_state(|state| {
                assert!(state.opened);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_reducer_test_runs_actions_in_order() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(closed())
            .when_action(TestAction::SetNarrow(true))
            .when_action(TestAction::Toggle)
            .then_state(|state| {
                assert!(state.narrow);
                assert!(state.opened);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_dispatches(effects, &[TestAction::Close]);
            })
            .run();
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<TestAction>(&[Effect::None]);
        assertions::assert_no_effects::<TestAction>(&[]);
    }

    #[test]
    #[should_panic(expected = "Expected no effects")]
    fn test_assertions_no_effects_rejects_dispatch() {
        assertions::assert_no_effects(&[Effect::dispatch(TestAction::Close)]);
    }
}
