//! Monte Carlo Tree Search (MCTS) decision policy for perfect-information games.
//!
//! This crate provides a game-agnostic UCT implementation that works with any
//! rule engine implementing the `game-core` Board trait.
//!
//! # Overview
//!
//! MCTS is a search algorithm that builds a game tree by running simulations.
//! Each simulation consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCT (Upper Confidence bound
//!    applied to Trees) to balance exploration and exploitation
//! 2. **Expansion**: Materialize one previously untried child of the
//!    selected node
//! 3. **Rollout**: Play a full game to completion from the new state using
//!    random moves with greedy win detection
//! 4. **Backpropagation**: Update visit counts and outcome scores along the
//!    path from the expanded node to the root
//!
//! After the simulation budget is exhausted, the action is chosen from the
//! root's children by the configured [`ActionPolicy`].
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::{State, TicTacToe};
//! use mcts::{think, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board = TicTacToe::new();
//! let state = State::new();
//!
//! let config = MctsConfig::default().with_simulations(200);
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let action = think(&board, state, config, &mut rng).unwrap();
//! println!("Best action: {:?}", action);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_simulations`: Number of simulations per search (default: 1000)
//! - `exploration`: Exploration constant for UCT (default: √2)
//! - `action_policy`: Final action choice — most-visited child (default) or
//!   a blend of win rate and visit depth
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MctsSearch                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │ SearchTree  │  │    Board    │  │       Rollout       │  │
//! │  │  (arena)    │  │ (game rules)│  │ (random play-outs)  │  │
//! │  └──────┬──────┘  └──────┬──────┘  └──────────┬──────────┘  │
//! │         │                │                    │             │
//! │         ▼                ▼                    ▼             │
//! │  ┌───────────────────────────────────────────────────────┐ │
//! │  │        select → expand → rollout → backpropagate      │ │
//! │  └───────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The search is single-threaded and synchronous: one call builds one tree,
//! runs its full budget, and drops the tree on return. Randomness comes from
//! an injected, seedable RNG, so searches are reproducible.

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{ActionPolicy, MctsConfig};
pub use node::{NodeId, SearchNode};
pub use rollout::{outcome_score, rollout};
pub use search::{think, MctsSearch, SearchError, SearchResult};
pub use tree::{SearchTree, TreeStats};
