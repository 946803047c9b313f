//! Solver library for the block-and-shoes sliding puzzle.
//!
//! A block and three shoes (red, blue, black) sit on a 3x3 board. Moving the
//! block can drag shoes stacked on it, under rules that differ per direction.
//! The puzzle is solved once the red and blue shoes share a cell. This crate
//! models the moves and finds a shortest solution with breadth-first search.

pub mod error;
pub mod node;
pub mod puzzle;
pub mod solver;
pub mod state;

// Re-export main types
pub use error::{InvalidConfiguration, InvalidDelta, ParsePositionError, SearchError};
pub use node::{NodeId, SearchNode, SearchTree};
pub use puzzle::{Direction, DirectionSet, Piece, Position};
pub use solver::{breadth_first_search, Path, SearchOutcome, SearchStats, Solution, Step};
pub use state::{PuzzleState, BOARD_SIZE};
