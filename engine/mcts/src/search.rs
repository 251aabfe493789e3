//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Traverse tree using UCT to find an expandable node
//! 2. Expansion: Add one untried child of that node
//! 3. Rollout: Play the game out to a terminal state
//! 4. Backpropagation: Update statistics along the path

use game_core::{Board, PlayerId};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::{NodeId, SearchNode};
use crate::rollout::{outcome_score, rollout};
use crate::tree::SearchTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("cannot search from an ended state")]
    TerminalState,

    #[error("no legal actions available")]
    NoLegalMoves,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Best action to take
    pub action: A,

    /// Mean outcome score at the root, in [0, 1], for the searching identity
    pub value: f64,

    /// Number of simulations performed
    pub simulations: u32,
}

/// MCTS search state for one decision point.
///
/// Builds a fresh tree per instance; nothing is retained between turns.
pub struct MctsSearch<'a, B: Board> {
    tree: SearchTree<B::State, B::Action>,
    board: &'a B,
    config: MctsConfig,
    identity: PlayerId,
}

impl<'a, B: Board> MctsSearch<'a, B> {
    /// Create a new search rooted at the given state.
    ///
    /// The searching identity is the player to move at `state`. Fails if the
    /// game has already ended there, or if the board reports no legal
    /// actions for a live state.
    pub fn new(board: &'a B, state: B::State, config: MctsConfig) -> Result<Self, SearchError> {
        if board.is_ended(&state) {
            return Err(SearchError::TerminalState);
        }

        let untried = board.legal_actions(&state);
        if untried.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let identity = board.current_player(&state);
        let tree = SearchTree::new(SearchNode::new_root(state, identity, untried));

        Ok(Self {
            tree,
            board,
            config,
            identity,
        })
    }

    /// Run the search for the configured number of simulations and pick the
    /// final action with the configured policy.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<B::Action>, SearchError> {
        for _ in 0..self.config.num_simulations {
            self.simulate(rng);
        }

        let action = self
            .tree
            .best_action(self.config.action_policy)
            .ok_or(SearchError::NoLegalMoves)?;

        let root = self.tree.get(self.tree.root());
        let stats = self.tree.stats();
        debug!(
            total_nodes = stats.total_nodes,
            root_visits = stats.root_visits,
            root_value = stats.root_value,
            max_depth = stats.max_depth,
            "search complete"
        );

        Ok(SearchResult {
            action,
            value: root.win_rate(),
            simulations: root.visits,
        })
    }

    /// Run a single simulation (select -> expand -> rollout -> backpropagate).
    fn simulate(&mut self, rng: &mut ChaCha20Rng) {
        // Selection: walk down to a terminal or expandable node
        let leaf_id = self.select();

        // Expansion: no-op when the selected node is terminal
        let node_id = self.expand(leaf_id, rng);

        // Rollout from the (possibly new) node's state
        let state = self.tree.get(node_id).state.clone();
        let terminal = rollout(self.board, state, rng);

        // Score the outcome for the searching identity and backpropagate
        let score = outcome_score(self.board, &terminal, self.identity);
        self.tree.backpropagate(node_id, score);

        trace!(node = node_id.0, score, "simulation complete");
    }

    /// Select a node by traversing the tree using UCT.
    ///
    /// Descends while the current node is non-terminal and fully expanded;
    /// the returned node is terminal or has at least one untried action.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            if node.terminal || !node.is_fully_expanded() {
                break;
            }

            match self
                .tree
                .select_child(current, self.config.exploration, self.identity)
            {
                Some(child_id) => current = child_id,
                None => break, // No children despite being fully expanded
            }
        }

        current
    }

    /// Expand one untried action of a node, chosen uniformly at random.
    ///
    /// Returns the new child, or the input node unchanged when it is
    /// terminal or has nothing left to try.
    fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> NodeId {
        if !self.tree.get(node_id).is_expandable() {
            return node_id;
        }

        let action = {
            let node = self.tree.get_mut(node_id);
            let idx = rng.gen_range(0..node.untried_actions.len());
            node.untried_actions.swap_remove(idx)
        };

        let state = self.board.next_state(&self.tree.get(node_id).state, &action);
        let terminal = self.board.is_ended(&state);
        let untried = if terminal {
            Vec::new()
        } else {
            self.board.legal_actions(&state)
        };
        let to_move = self.board.current_player(&state);

        self.tree.add_child(node_id, action, state, to_move, terminal, untried)
    }

    /// The player the search optimizes for.
    pub fn identity(&self) -> PlayerId {
        self.identity
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree<B::State, B::Action> {
        &self.tree
    }
}

/// Convenience function: run a full search and return just the chosen action.
pub fn think<B: Board>(
    board: &B,
    state: B::State,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<B::Action, SearchError> {
    let mut search = MctsSearch::new(board, state, config)?;
    search.run(rng).map(|result| result.action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActionPolicy;
    use games_tictactoe::{Action, State, TicTacToe};
    use rand::SeedableRng;
    use std::collections::HashMap;

    /// X at 0 and 1, O at 3 and 4; X to move can win at position 2.
    fn one_move_from_x_win() -> State {
        let mut state = State::new();
        for pos in [0, 3, 1, 4] {
            state = state.make_move(pos);
        }
        state
    }

    #[test]
    fn test_basic_search_returns_legal_action() {
        let board = TicTacToe::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let action = think(&board, State::new(), MctsConfig::for_testing(), &mut rng).unwrap();
        assert!(action.position() < 9);
    }

    #[test]
    fn test_search_rejects_terminal_state() {
        let board = TicTacToe::new();
        let mut state = State::new();
        for pos in [0, 3, 1, 4, 2] {
            state = state.make_move(pos); // X wins the top row
        }

        let result = MctsSearch::new(&board, state, MctsConfig::for_testing());
        assert!(matches!(result, Err(SearchError::TerminalState)));
    }

    #[test]
    fn test_search_rejects_boards_without_moves() {
        /// Claims to be live but offers no actions, breaching the Board
        /// contract.
        #[derive(Debug)]
        struct Stuck;

        impl Board for Stuck {
            type State = ();
            type Action = u8;

            fn is_ended(&self, _state: &()) -> bool {
                false
            }

            fn legal_actions(&self, _state: &()) -> Vec<u8> {
                Vec::new()
            }

            fn next_state(&self, _state: &(), _action: &u8) {
                unreachable!()
            }

            fn current_player(&self, _state: &()) -> PlayerId {
                PlayerId(1)
            }

            fn points_values(&self, _state: &()) -> Option<HashMap<PlayerId, i32>> {
                None
            }
        }

        let result = MctsSearch::new(&Stuck, (), MctsConfig::for_testing());
        assert!(matches!(result, Err(SearchError::NoLegalMoves)));
    }

    #[test]
    fn test_single_legal_action() {
        let board = TicTacToe::new();

        // Eight moves of a known drawn line leave only position 3 open
        let mut state = State::new();
        for pos in [0, 4, 8, 1, 7, 6, 2, 5] {
            state = state.make_move(pos);
        }
        assert_eq!(board.legal_actions(&state), vec![Action::Place(3)]);

        for budget in [1, 5, 50] {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let config = MctsConfig::for_testing().with_simulations(budget);
            let action = think(&board, state, config, &mut rng).unwrap();
            assert_eq!(action, Action::Place(3));
        }
    }

    #[test]
    fn test_finds_winning_move() {
        let board = TicTacToe::new();
        let state = one_move_from_x_win();

        for seed in [1, 7, 42] {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let config = MctsConfig::for_testing().with_simulations(200);
            let action = think(&board, state, config, &mut rng).unwrap();
            assert_eq!(action, Action::Place(2), "seed {seed}");
        }
    }

    #[test]
    fn test_finds_winning_move_with_blended_policy() {
        let board = TicTacToe::new();
        let state = one_move_from_x_win();

        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let config = MctsConfig::for_testing()
            .with_simulations(200)
            .with_action_policy(ActionPolicy::blended());
        let action = think(&board, state, config, &mut rng).unwrap();
        assert_eq!(action, Action::Place(2));
    }

    #[test]
    fn test_winning_root_has_high_value() {
        let board = TicTacToe::new();
        let state = one_move_from_x_win();

        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut search = MctsSearch::new(
            &board,
            state,
            MctsConfig::for_testing().with_simulations(400),
        )
        .unwrap();
        let result = search.run(&mut rng).unwrap();

        assert_eq!(result.action, Action::Place(2));
        // Most simulations funnel into the immediate win
        assert!(result.value > 0.5, "value was {}", result.value);
    }

    #[test]
    fn test_determinism_with_seeded_rng() {
        let board = TicTacToe::new();
        let config = MctsConfig::for_testing().with_simulations(200);

        let mut first_rng = ChaCha20Rng::seed_from_u64(1234);
        let first = think(&board, State::new(), config.clone(), &mut first_rng).unwrap();

        let mut second_rng = ChaCha20Rng::seed_from_u64(1234);
        let second = think(&board, State::new(), config, &mut second_rng).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_root_children_visits_sum_to_budget() {
        let board = TicTacToe::new();
        let budget = 1000;

        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut search = MctsSearch::new(
            &board,
            State::new(),
            MctsConfig::default().with_simulations(budget),
        )
        .unwrap();
        let result = search.run(&mut rng).unwrap();
        assert_eq!(result.simulations, budget);

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert_eq!(root.visits, budget);

        // Every simulation ends at or below one root child, so the children's
        // visits partition the budget exactly
        let child_visits: u32 = root
            .children
            .iter()
            .map(|(_, id)| tree.get(*id).visits)
            .sum();
        assert_eq!(child_visits, budget);
    }

    #[test]
    fn test_tree_visit_counts_are_consistent() {
        let board = TicTacToe::new();

        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut search = MctsSearch::new(
            &board,
            State::new(),
            MctsConfig::for_testing().with_simulations(300),
        )
        .unwrap();
        search.run(&mut rng).unwrap();

        // A node's visits equal the simulations that passed through it, so
        // they can never be fewer than its children's combined visits; the
        // remainder is rollouts that ended at the node itself.
        let tree = search.tree();
        for i in 0..tree.len() {
            let node = tree.get(NodeId(i as u32));
            let child_visits: u32 = node
                .children
                .iter()
                .map(|(_, id)| tree.get(*id).visits)
                .sum();
            assert!(
                node.visits >= child_visits,
                "node {i}: {} visits < {} child visits",
                node.visits,
                child_visits
            );

            // The legal-action set is fixed at creation and only ever moves
            // from untried to children
            for (action, _) in &node.children {
                assert!(!node.untried_actions.contains(action));
            }
        }
    }

    #[test]
    fn test_more_budget_explores_no_fewer_nodes() {
        let board = TicTacToe::new();

        let node_count = |budget: u32| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let mut search = MctsSearch::new(
                &board,
                State::new(),
                MctsConfig::for_testing().with_simulations(budget),
            )
            .unwrap();
            search.run(&mut rng).unwrap();
            search.tree().stats().total_nodes
        };

        assert!(node_count(400) >= node_count(100));
    }
}
