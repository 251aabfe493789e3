//! MCTS configuration parameters.

use std::f64::consts::SQRT_2;

/// Policy for picking the final action from the root after search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionPolicy {
    /// Pick the most-visited child. The standard, robust MCTS choice:
    /// a branch only accumulates visits by surviving repeated UCB scrutiny.
    MaxVisits,

    /// Pick the child maximizing `win_rate + k * sqrt(visits)` among visited
    /// children, rewarding both strength and exploration depth. Falls back
    /// to `MaxVisits` when no child has been visited.
    Blended {
        /// Visit-count bonus weight. Small values (~0.1) keep win rate dominant.
        k: f64,
    },
}

impl ActionPolicy {
    /// Blended policy with the conventional bonus weight of 0.1.
    pub fn blended() -> Self {
        Self::Blended { k: 0.1 }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run per search.
    pub num_simulations: u32,

    /// Exploration constant for the UCT formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    /// √2 is the theoretically motivated constant for rewards in [0, 1].
    pub exploration: f64,

    /// How to pick the final action once the budget is exhausted.
    pub action_policy: ActionPolicy,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 1000,
            exploration: SQRT_2,
            action_policy: ActionPolicy::MaxVisits,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 50,
            exploration: SQRT_2,
            action_policy: ActionPolicy::MaxVisits,
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the terminal action-choice policy.
    pub fn with_action_policy(mut self, policy: ActionPolicy) -> Self {
        self.action_policy = policy;
        self
    }
}
