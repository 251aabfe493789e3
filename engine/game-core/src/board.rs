//! Typed Board trait providing the rules interface for game search
//!
//! A `Board` owns a game's rules; search algorithms thread opaque states and
//! actions through it without ever inspecting their internals. States are
//! values: `next_state` returns a new state rather than mutating in place, so
//! a searcher can hold many positions from the same game at once.

use std::collections::HashMap;

/// Identifier for a player in a game. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u8);

/// Main trait for game rule engines consumed by search.
///
/// Implementations define their own state and action types. The trait only
/// requires what tree search needs: terminal detection, legal-move
/// enumeration, transitions, turn ownership, and final scoring.
///
/// # Contract
///
/// * `legal_actions` returns an empty list exactly when `is_ended` is true.
/// * `next_state` must fail (panic or assert) when handed an action that is
///   not legal for the given state; callers do not re-validate legality.
/// * `points_values` is `Some` only for ended states.
///
/// # Example
///
/// ```rust
/// use game_core::{Board, PlayerId};
/// use std::collections::HashMap;
///
/// /// One player counts down from a starting value; reaching zero ends
/// /// the game with a win.
/// #[derive(Debug)]
/// struct Countdown;
///
/// impl Board for Countdown {
///     type State = u8;
///     type Action = u8;
///
///     fn is_ended(&self, state: &u8) -> bool {
///         *state == 0
///     }
///
///     fn legal_actions(&self, state: &u8) -> Vec<u8> {
///         (1..=(*state).min(3)).collect()
///     }
///
///     fn next_state(&self, state: &u8, action: &u8) -> u8 {
///         assert!(*action >= 1 && action <= state);
///         state - action
///     }
///
///     fn current_player(&self, _state: &u8) -> PlayerId {
///         PlayerId(1)
///     }
///
///     fn points_values(&self, state: &u8) -> Option<HashMap<PlayerId, i32>> {
///         self.is_ended(state)
///             .then(|| HashMap::from([(PlayerId(1), 1)]))
///     }
/// }
/// ```
pub trait Board: Send + Sync {
    /// Game state type - a value, cheap enough to clone per tree node
    type State: Clone + Send + 'static;

    /// Action type - should be small and Clone; compared when choosing moves
    type Action: Clone + PartialEq + Send + 'static;

    /// Whether the game has ended at this state
    fn is_ended(&self, state: &Self::State) -> bool;

    /// All legal actions at this state; empty exactly when ended
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state reached by applying a legal action
    fn next_state(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// The player whose turn it is at this state
    fn current_player(&self, state: &Self::State) -> PlayerId;

    /// Final score per player, `Some` only for ended states.
    ///
    /// Scores are conventionally in {-1, 0, 1} (loss, draw, win), but any
    /// signed convention works as long as winners are positive and losers
    /// negative.
    fn points_values(&self, state: &Self::State) -> Option<HashMap<PlayerId, i32>>;
}
