//! Rollout (simulation) phase and outcome scoring.
//!
//! A rollout plays a game to completion from a given state using the board
//! collaborator alone; it never touches the search tree. The outcome adapter
//! then collapses the terminal points table into a single scalar in [0, 1]
//! for the searching identity, which is all backpropagation ever sees.

use game_core::{Board, PlayerId};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Play out a game to a terminal state.
///
/// Move choice is uniformly random with one refinement: if any legal action
/// immediately ends the game as a WIN for the player about to move, it is
/// taken. This is a one-ply check, not lookahead; a move that hands the
/// opponent a win next turn is not avoided.
pub fn rollout<B: Board>(board: &B, state: B::State, rng: &mut ChaCha20Rng) -> B::State {
    let mut state = state;

    while !board.is_ended(&state) {
        let actions = board.legal_actions(&state);
        if actions.is_empty() {
            // Contract breach (legal_actions is empty iff ended); stop
            // rather than loop forever
            break;
        }

        let mover = board.current_player(&state);

        // Greedy win detection: take an immediately winning move if one exists
        let winning = actions.iter().find_map(|action| {
            let next = board.next_state(&state, action);
            (board.is_ended(&next) && wins_for(board, &next, mover)).then_some(next)
        });

        state = match winning {
            Some(next) => next,
            None => {
                let action = &actions[rng.gen_range(0..actions.len())];
                board.next_state(&state, action)
            }
        };
    }

    state
}

/// Whether a terminal state is a win for the given player.
fn wins_for<B: Board>(board: &B, terminal: &B::State, player: PlayerId) -> bool {
    board
        .points_values(terminal)
        .is_some_and(|points| points.get(&player).copied().unwrap_or(0) > 0)
}

/// Collapse a terminal points table into a backpropagation score for the
/// searching identity: win -> 1.0, loss -> 0.0, draw (or absent) -> 0.5.
pub fn outcome_score<B: Board>(board: &B, terminal: &B::State, identity: PlayerId) -> f64 {
    let value = board
        .points_values(terminal)
        .and_then(|points| points.get(&identity).copied())
        .unwrap_or(0);

    match value {
        v if v > 0 => 1.0,
        v if v < 0 => 0.0,
        _ => 0.5,
    }
}
