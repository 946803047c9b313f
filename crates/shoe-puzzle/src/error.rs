//! Error types for state construction, input parsing and node expansion.
//!
//! "No solution" is not represented here: an exhausted search is a normal
//! outcome and is reported through [`crate::solver::SearchOutcome`].

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::puzzle::{Piece, Position};

/// A board configuration that cannot be turned into a [`crate::state::PuzzleState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidConfiguration {
    /// Exactly four positions are required, one per piece.
    PieceCount(usize),
    /// The piece lies outside the 3x3 board.
    OffBoard { piece: Piece, position: Position },
    /// The blue and black shoes share a cell.
    ShoesCollide(Position),
}

impl Display for InvalidConfiguration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfiguration::PieceCount(count) => {
                write!(f, "expected 4 piece positions, got {count}")
            }
            InvalidConfiguration::OffBoard { piece, position } => {
                write!(f, "{piece} is off the board at {position}")
            }
            InvalidConfiguration::ShoesCollide(position) => {
                write!(f, "blue shoe and black shoe both occupy {position}")
            }
        }
    }
}

impl Error for InvalidConfiguration {}

/// A row/column delta that is not one of the four unit steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDelta {
    pub row: i32,
    pub col: i32,
}

impl Display for InvalidDelta {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}) is not a unit step", self.row, self.col)
    }
}

impl Error for InvalidDelta {}

/// Failure to parse a `row,col` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePositionError(pub(crate) String);

impl Display for ParsePositionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected a position as `row,col`, got {:?}", self.0)
    }
}

impl Error for ParsePositionError {}

/// Misuse of the search node API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Every outgoing direction of the node has already been expanded.
    NoNextChild,
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::NoNextChild => f.write_str("node has no unexplored directions left"),
        }
    }
}

impl Error for SearchError {}
