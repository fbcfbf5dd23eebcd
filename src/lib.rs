//! # N-Puzzle Solver Library
//!
//! This library provides a board model for the n×n sliding-tile puzzle and an
//! A* solver that finds a shortest solution or proves the board unsolvable.
//!
//! It is used by two binaries:
//! - `solve`: Reads a board file, solves it and prints the minimum number of
//!   moves followed by every board on a shortest path.
//! - `heuristic_evaluator`: Solves a batch of seeded random boards with each
//!   heuristic and compares how much work the search does.
//!
//! ## Modules
//! - `engine`: The immutable `Board` (distances, goal test, neighbors, twin,
//!   display) and the `Move` type.
//! - `heuristics`: The `Heuristic` selector and the inversion-parity
//!   solvability check.
//! - `solver`: The `Solver`, which races an A* search on the board against one
//!   on its twin.
//! - `utils`: Parsing boards from text and files.
//! - `error`: Error types for parsing and solver construction.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use crate::engine::{Board, Move};
pub use crate::heuristics::Heuristic;
pub use crate::solver::Solver;
