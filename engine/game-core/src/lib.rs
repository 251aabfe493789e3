//! Core abstractions for turn-based game search
//!
//! This crate defines the seam between a search algorithm and a game's rule
//! engine:
//! - `Board`: typed trait exposing legal-move generation, state transitions,
//!   terminal detection and scoring
//! - `PlayerId`: identifier for a player in a game

pub mod board;

// Re-export main types for convenience
pub use board::{Board, PlayerId};
