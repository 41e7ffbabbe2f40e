//! A* solver library for the 3x3 sliding-tile puzzle.
//!
//! This crate provides a validated board model and a bounded A* search
//! that returns the optimal move sequence from a start board to the
//! canonical goal arrangement, or a distinguishable "unsolvable" /
//! "out of budget" outcome. The presentation layer (rendering, pacing,
//! user interaction) is deliberately out of scope: callers feed a board
//! in and consume the ordered state sequence.
//!
//! ## Modules
//! - `board`: board representation, validation, Manhattan heuristic,
//!   neighbor generation, and solvability parity.
//! - `frontier`: the open list, a binary heap with deterministic
//!   insertion-order tie-breaking.
//! - `solver`: the arena-based A* engine and path reconstruction.

pub mod board;
pub mod frontier;
pub mod solver;

// Re-export main types
pub use board::{Board, BoardError, CELLS, GOAL, SIDE};
pub use frontier::Frontier;
pub use solver::{solve, NodeId, SearchOutcome, Solution, SolverConfig, SolverResult};
