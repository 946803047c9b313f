//! Board primitives: positions, directions and piece roles.
//!
//! These are plain `Copy` values. Bounds checking belongs to
//! [`crate::state::PuzzleState`], so a `Position` may sit off the board.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{InvalidDelta, ParsePositionError};

/// Direction in which the block is moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in the order they are expanded.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit `(row, col)` step for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Look up the direction whose delta is `(d_row, d_col)`.
    pub fn of(d_row: i32, d_col: i32) -> Result<Direction, InvalidDelta> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.delta() == (d_row, d_col))
            .ok_or(InvalidDelta {
                row: d_row,
                col: d_col,
            })
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "UP",
            Direction::Right => "RIGHT",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
        })
    }
}

bitflags! {
    /// A small set of directions, iterated in [`Direction::ALL`] order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirectionSet: u8 {
        const UP = 0b0001;
        const RIGHT = 0b0010;
        const DOWN = 0b0100;
        const LEFT = 0b1000;
    }
}

impl From<Direction> for DirectionSet {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => DirectionSet::UP,
            Direction::Right => DirectionSet::RIGHT,
            Direction::Down => DirectionSet::DOWN,
            Direction::Left => DirectionSet::LEFT,
        }
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(DirectionSet::empty(), |set, direction| {
                set | DirectionSet::from(direction)
            })
    }
}

impl DirectionSet {
    /// Check membership of a single direction
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.into())
    }

    /// The member directions, in expansion order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| self.has(direction))
    }

    /// Remove and return the first member, if any.
    pub fn pop_first(&mut self) -> Option<Direction> {
        let direction = self.directions().next()?;
        self.remove(direction.into());
        Some(direction)
    }
}

/// Position on the board, `(row, col)` with row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    row: i32,
    col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    /// The adjacent position in `direction`.
    pub fn neighbor(&self, direction: Direction) -> Position {
        let (d_row, d_col) = direction.delta();
        Position::new(self.row + d_row, self.col + d_col)
    }

    pub fn up(&self) -> Position {
        self.neighbor(Direction::Up)
    }

    pub fn right(&self) -> Position {
        self.neighbor(Direction::Right)
    }

    pub fn down(&self) -> Position {
        self.neighbor(Direction::Down)
    }

    pub fn left(&self) -> Position {
        self.neighbor(Direction::Left)
    }

    /// Move this position one step in place.
    pub(crate) fn shift(&mut self, direction: Direction) {
        *self = self.neighbor(direction);
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position::new(row, col)
    }
}

impl From<Position> for (i32, i32) {
    fn from(position: Position) -> Self {
        (position.row, position.col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed
            .split_once(',')
            .ok_or_else(|| ParsePositionError(s.to_string()))?;
        let row = row
            .trim()
            .parse()
            .map_err(|_| ParsePositionError(s.to_string()))?;
        let col = col
            .trim()
            .parse()
            .map_err(|_| ParsePositionError(s.to_string()))?;
        Ok(Position::new(row, col))
    }
}

/// Role of a piece; doubles as its index in the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Piece {
    Block,
    RedShoe,
    BlueShoe,
    BlackShoe,
}

impl Piece {
    /// All pieces, in state order.
    pub const ALL: [Piece; 4] = [
        Piece::Block,
        Piece::RedShoe,
        Piece::BlueShoe,
        Piece::BlackShoe,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Piece::Block => "block",
            Piece::RedShoe => "red shoe",
            Piece::BlueShoe => "blue shoe",
            Piece::BlackShoe => "black shoe",
        })
    }
}
