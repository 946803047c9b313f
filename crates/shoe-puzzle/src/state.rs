//! Puzzle state and its transition model.
//!
//! A state is the position of each of the four pieces. The block is the only
//! piece moved directly; shoes stacked on the block are dragged along
//! according to per-direction coupling rules:
//!
//! | direction | dragged when stacked on the block          |
//! |-----------|--------------------------------------------|
//! | up        | black shoe (and red shoe, only if black is) |
//! | right     | red, blue, black                           |
//! | down      | red, blue, black                           |
//! | left      | red, blue                                  |

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::InvalidConfiguration;
use crate::puzzle::{Direction, DirectionSet, Piece, Position};

/// Side length of the square board
pub const BOARD_SIZE: i32 = 3;

/// Board configuration, one position per [`Piece`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StateConfig", into = "StateConfig")]
pub struct PuzzleState {
    positions: [Position; 4],
}

/// Serialized forms of a state. Both go through validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum StateConfig {
    Named {
        block: Position,
        red: Position,
        blue: Position,
        black: Position,
    },
    Listed(Vec<Position>),
}

impl TryFrom<StateConfig> for PuzzleState {
    type Error = InvalidConfiguration;

    fn try_from(config: StateConfig) -> Result<Self, Self::Error> {
        match config {
            StateConfig::Named {
                block,
                red,
                blue,
                black,
            } => PuzzleState::new(&[block, red, blue, black]),
            StateConfig::Listed(positions) => PuzzleState::new(&positions),
        }
    }
}

impl From<PuzzleState> for StateConfig {
    fn from(state: PuzzleState) -> Self {
        StateConfig::Listed(state.positions.to_vec())
    }
}

impl Default for PuzzleState {
    /// The canonical starting layout.
    fn default() -> Self {
        Self {
            positions: [
                Position::new(0, 0),
                Position::new(2, 0),
                Position::new(1, 1),
                Position::new(0, 2),
            ],
        }
    }
}

impl PuzzleState {
    /// Build a state from positions given in [`Piece::ALL`] order.
    pub fn new(positions: &[Position]) -> Result<Self, InvalidConfiguration> {
        let positions: [Position; 4] = positions
            .try_into()
            .map_err(|_| InvalidConfiguration::PieceCount(positions.len()))?;

        for piece in Piece::ALL {
            let position = positions[piece.index()];
            if !is_on_board(position) {
                return Err(InvalidConfiguration::OffBoard { piece, position });
            }
        }

        let blue = positions[Piece::BlueShoe.index()];
        if blue == positions[Piece::BlackShoe.index()] {
            return Err(InvalidConfiguration::ShoesCollide(blue));
        }

        Ok(Self { positions })
    }

    pub fn position(&self, piece: Piece) -> Position {
        self.positions[piece.index()]
    }

    pub fn positions(&self) -> &[Position; 4] {
        &self.positions
    }

    /// Solved once the red and blue shoes share a cell.
    pub fn is_goal(&self) -> bool {
        self.coincide(Piece::RedShoe, Piece::BlueShoe)
    }

    /// Whether the block may be moved in `direction`.
    pub fn can_move(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.can_move_up(),
            Direction::Right => self.can_move_right(),
            Direction::Down => self.can_move_down(),
            Direction::Left => self.can_move_left(),
        }
    }

    fn can_move_up(&self) -> bool {
        let block = self.position(Piece::Block);
        block.row() > 0 && self.is_empty(block.up())
    }

    fn can_move_right(&self) -> bool {
        let block = self.position(Piece::Block);
        if block.col() == BOARD_SIZE - 1 {
            return false;
        }
        let right = block.right();
        self.is_empty(right)
            || (self.position(Piece::BlackShoe) == right
                && !self.coincide(Piece::Block, Piece::BlueShoe))
    }

    fn can_move_down(&self) -> bool {
        let block = self.position(Piece::Block);
        if block.row() == BOARD_SIZE - 1 {
            return false;
        }
        let down = block.down();
        if self.is_empty(down) {
            return true;
        }
        // The black shoe is never pushed down, whether carried or in the way.
        if self.coincide(Piece::BlackShoe, Piece::Block) || self.position(Piece::BlackShoe) == down
        {
            return false;
        }
        self.position(Piece::BlueShoe) == down
            || (self.position(Piece::RedShoe) == down
                && !self.coincide(Piece::BlueShoe, Piece::Block))
    }

    fn can_move_left(&self) -> bool {
        let block = self.position(Piece::Block);
        block.col() > 0 && self.is_empty(block.left())
    }

    /// Move the block in `direction`, dragging whatever is coupled to it.
    ///
    /// The caller must have checked [`PuzzleState::can_move`]; no bounds
    /// check is repeated here. Branch by calling this on a copy.
    pub fn apply_move(&mut self, direction: Direction) {
        debug_assert!(self.can_move(direction), "illegal move {direction} from {self}");
        match direction {
            Direction::Up => {
                if self.coincide(Piece::BlackShoe, Piece::Block) {
                    if self.coincide(Piece::RedShoe, Piece::Block) {
                        self.shift(Piece::RedShoe, direction);
                    }
                    self.shift(Piece::BlackShoe, direction);
                }
                self.shift(Piece::Block, direction);
            }
            Direction::Right | Direction::Down => self.drag(
                direction,
                &[Piece::RedShoe, Piece::BlueShoe, Piece::BlackShoe],
            ),
            Direction::Left => self.drag(direction, &[Piece::RedShoe, Piece::BlueShoe]),
        }
    }

    /// Move the block and any of `shoes` stacked on it.
    fn drag(&mut self, direction: Direction, shoes: &[Piece]) {
        let block = self.position(Piece::Block);
        for &shoe in shoes {
            if self.position(shoe) == block {
                self.shift(shoe, direction);
            }
        }
        self.shift(Piece::Block, direction);
    }

    /// The state reached by moving in `direction`, or `None` if that move is illegal.
    pub fn successor(&self, direction: Direction) -> Option<PuzzleState> {
        if !self.can_move(direction) {
            return None;
        }
        let mut next = *self;
        next.apply_move(direction);
        Some(next)
    }

    /// Every direction the block may currently move in.
    pub fn legal_moves(&self) -> DirectionSet {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.can_move(direction))
            .collect()
    }

    fn shift(&mut self, piece: Piece, direction: Direction) {
        self.positions[piece.index()].shift(direction);
    }

    fn coincide(&self, a: Piece, b: Piece) -> bool {
        self.position(a) == self.position(b)
    }

    fn is_empty(&self, position: Position) -> bool {
        !self.positions.contains(&position)
    }
}

fn is_on_board(position: Position) -> bool {
    (0..BOARD_SIZE).contains(&position.row()) && (0..BOARD_SIZE).contains(&position.col())
}

impl Display for PuzzleState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, position) in self.positions.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{position}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn state(positions: [(i32, i32); 4]) -> PuzzleState {
        let positions: Vec<Position> = positions.into_iter().map(Position::from).collect();
        PuzzleState::new(&positions).unwrap()
    }

    /// The canonical start
    fn state1() -> PuzzleState {
        PuzzleState::default()
    }

    /// A goal state
    fn state2() -> PuzzleState {
        state([(1, 1), (1, 1), (1, 1), (1, 2)])
    }

    /// A non-goal state with every move legal
    fn state3() -> PuzzleState {
        state([(1, 1), (2, 0), (1, 1), (0, 2)])
    }

    /// A dead end with no legal moves
    fn state4() -> PuzzleState {
        state([(0, 0), (1, 0), (0, 1), (0, 0)])
    }

    fn legal(directions: &[Direction]) -> DirectionSet {
        directions.iter().copied().collect()
    }

    #[test]
    fn test_default_is_canonical_start() {
        assert_eq!(state1(), state([(0, 0), (2, 0), (1, 1), (0, 2)]));
    }

    #[test]
    fn test_constructor_rejects_wrong_count() {
        assert_eq!(
            PuzzleState::new(&[Position::new(0, 0)]),
            Err(InvalidConfiguration::PieceCount(1))
        );
        assert_eq!(
            PuzzleState::new(&[Position::new(0, 0); 5]),
            Err(InvalidConfiguration::PieceCount(5))
        );
        assert_eq!(
            PuzzleState::new(&[]),
            Err(InvalidConfiguration::PieceCount(0))
        );
    }

    #[test]
    fn test_constructor_rejects_off_board() {
        let positions = [
            Position::new(0, 0),
            Position::new(1, 1),
            Position::new(2, 2),
            Position::new(3, 3),
        ];
        assert_eq!(
            PuzzleState::new(&positions),
            Err(InvalidConfiguration::OffBoard {
                piece: Piece::BlackShoe,
                position: Position::new(3, 3),
            })
        );

        let negative = [
            Position::new(0, -1),
            Position::new(1, 1),
            Position::new(2, 2),
            Position::new(0, 2),
        ];
        assert!(matches!(
            PuzzleState::new(&negative),
            Err(InvalidConfiguration::OffBoard {
                piece: Piece::Block,
                ..
            })
        ));
    }

    #[test]
    fn test_constructor_rejects_blue_on_black() {
        assert_eq!(
            PuzzleState::new(&[Position::new(1, 1); 4]),
            Err(InvalidConfiguration::ShoesCollide(Position::new(1, 1)))
        );
    }

    #[test]
    fn test_constructor_allows_other_stacking() {
        // Block, red and blue stacked; black alone.
        assert!(PuzzleState::new(&[
            Position::new(2, 2),
            Position::new(2, 2),
            Position::new(2, 2),
            Position::new(0, 0),
        ])
        .is_ok());
    }

    #[test]
    fn test_is_goal() {
        assert!(!state1().is_goal());
        assert!(state2().is_goal());
        assert!(!state3().is_goal());
        assert!(!state4().is_goal());
    }

    #[test]
    fn test_can_move_state1() {
        let s = state1();
        assert!(!s.can_move(Direction::Up));
        assert!(s.can_move(Direction::Right));
        assert!(s.can_move(Direction::Down));
        assert!(!s.can_move(Direction::Left));
    }

    #[test]
    fn test_can_move_state2() {
        let s = state2();
        assert!(s.can_move(Direction::Up));
        assert!(!s.can_move(Direction::Right));
        assert!(s.can_move(Direction::Down));
        assert!(s.can_move(Direction::Left));
    }

    #[test]
    fn test_can_move_state3() {
        let s = state3();
        for direction in Direction::ALL {
            assert!(s.can_move(direction), "{direction} should be legal");
        }
    }

    #[test]
    fn test_can_move_state4() {
        let s = state4();
        for direction in Direction::ALL {
            assert!(!s.can_move(direction), "{direction} should be illegal");
        }
    }

    #[test]
    fn test_legal_moves() {
        assert_eq!(
            state1().legal_moves(),
            legal(&[Direction::Down, Direction::Right])
        );
        assert_eq!(
            state2().legal_moves(),
            legal(&[Direction::Up, Direction::Down, Direction::Left])
        );
        assert_eq!(state3().legal_moves(), DirectionSet::all());
        assert_eq!(state4().legal_moves(), DirectionSet::empty());
    }

    #[test]
    fn test_move_state1_right() {
        let mut s = state1();
        let before = s;
        s.apply_move(Direction::Right);
        assert_eq!(s.position(Piece::Block), before.position(Piece::Block).right());
        assert_eq!(s.position(Piece::RedShoe), before.position(Piece::RedShoe));
        assert_eq!(s.position(Piece::BlueShoe), before.position(Piece::BlueShoe));
        assert_eq!(s.position(Piece::BlackShoe), before.position(Piece::BlackShoe));
    }

    #[test]
    fn test_move_state1_down() {
        let mut s = state1();
        s.apply_move(Direction::Down);
        assert_eq!(s, state([(1, 0), (2, 0), (1, 1), (0, 2)]));
    }

    #[test]
    fn test_move_state3_up() {
        let mut s = state3();
        s.apply_move(Direction::Up);
        assert_eq!(s, state([(0, 1), (2, 0), (1, 1), (0, 2)]));
    }

    #[test]
    fn test_move_state3_right_drags_blue() {
        let mut s = state3();
        s.apply_move(Direction::Right);
        assert_eq!(s, state([(1, 2), (2, 0), (1, 2), (0, 2)]));
    }

    #[test]
    fn test_move_state3_down_drags_blue() {
        let mut s = state3();
        s.apply_move(Direction::Down);
        assert_eq!(s, state([(2, 1), (2, 0), (2, 1), (0, 2)]));
    }

    #[test]
    fn test_move_state3_left_drags_blue() {
        let mut s = state3();
        s.apply_move(Direction::Left);
        assert_eq!(s, state([(1, 0), (2, 0), (1, 0), (0, 2)]));
    }

    #[test]
    fn test_up_carries_black_and_stacked_red() {
        let mut s = state([(1, 1), (1, 1), (0, 0), (1, 1)]);
        assert!(s.can_move(Direction::Up));
        s.apply_move(Direction::Up);
        assert_eq!(s, state([(0, 1), (0, 1), (0, 0), (0, 1)]));
    }

    #[test]
    fn test_up_leaves_red_without_black() {
        let mut s = state([(1, 1), (1, 1), (0, 0), (2, 2)]);
        s.apply_move(Direction::Up);
        assert_eq!(s, state([(0, 1), (1, 1), (0, 0), (2, 2)]));
    }

    #[test]
    fn test_left_never_drags_black() {
        let mut s = state([(1, 1), (2, 2), (0, 0), (1, 1)]);
        assert!(s.can_move(Direction::Left));
        s.apply_move(Direction::Left);
        assert_eq!(s, state([(1, 0), (2, 2), (0, 0), (1, 1)]));
    }

    #[test]
    fn test_right_onto_black_shoe() {
        let s = state([(0, 0), (2, 2), (2, 0), (0, 1)]);
        assert!(s.can_move(Direction::Right));
        assert_eq!(
            s.successor(Direction::Right),
            Some(state([(0, 1), (2, 2), (2, 0), (0, 1)]))
        );

        // Carrying the blue shoe, the block cannot enter the black shoe's cell.
        let carrying_blue = state([(0, 0), (2, 2), (0, 0), (0, 1)]);
        assert!(!carrying_blue.can_move(Direction::Right));
    }

    #[test]
    fn test_right_blocked_by_red_or_blue() {
        assert!(!state([(0, 0), (0, 1), (2, 2), (2, 0)]).can_move(Direction::Right));
        assert!(!state([(0, 0), (2, 2), (0, 1), (2, 0)]).can_move(Direction::Right));
    }

    #[test]
    fn test_down_onto_blue_shoe() {
        let s = state([(0, 0), (2, 2), (1, 0), (0, 2)]);
        assert!(s.can_move(Direction::Down));
        assert_eq!(
            s.successor(Direction::Down),
            Some(state([(1, 0), (2, 2), (1, 0), (0, 2)]))
        );
    }

    #[test]
    fn test_down_never_pushes_black() {
        // Black carried by the block, target occupied.
        assert!(!state([(0, 0), (2, 2), (1, 0), (0, 0)]).can_move(Direction::Down));
        // Black in the target cell.
        assert!(!state([(0, 0), (2, 2), (2, 0), (1, 0)]).can_move(Direction::Down));
        // Black carried, target empty: allowed.
        let mut s = state([(0, 0), (2, 2), (2, 0), (0, 0)]);
        assert!(s.can_move(Direction::Down));
        s.apply_move(Direction::Down);
        assert_eq!(s, state([(1, 0), (2, 2), (2, 0), (1, 0)]));
    }

    #[test]
    fn test_down_onto_red_shoe() {
        assert!(state([(0, 0), (1, 0), (2, 2), (0, 2)]).can_move(Direction::Down));
        // Not while carrying the blue shoe.
        assert!(!state([(0, 0), (1, 0), (0, 0), (0, 2)]).can_move(Direction::Down));
    }

    #[test]
    fn test_blocked_at_edges() {
        let corner = state([(2, 2), (0, 0), (0, 1), (1, 0)]);
        assert!(!corner.can_move(Direction::Down));
        assert!(!corner.can_move(Direction::Right));
        assert!(corner.can_move(Direction::Up));
        assert!(corner.can_move(Direction::Left));
    }

    #[test]
    fn test_successor_rejects_illegal_move() {
        assert_eq!(state1().successor(Direction::Up), None);
        assert_eq!(state4().successor(Direction::Down), None);
    }

    #[test]
    fn test_copy_is_isolated() {
        let original = state1();
        let mut copy = original;
        copy.apply_move(Direction::Right);
        assert_ne!(copy, original);
        assert_eq!(original, state1());
    }

    #[test]
    fn test_equality_and_hash() {
        assert_eq!(state1(), state1());
        assert_ne!(state1(), state2());

        let mut seen = HashSet::new();
        assert!(seen.insert(state1()));
        assert!(!seen.insert(PuzzleState::default()));
        assert!(seen.insert(state3()));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(state1().to_string(), "[(0,0),(2,0),(1,1),(0,2)]");
        assert_eq!(state2().to_string(), "[(1,1),(1,1),(1,1),(1,2)]");
        assert_eq!(state3().to_string(), "[(1,1),(2,0),(1,1),(0,2)]");
        assert_eq!(state4().to_string(), "[(0,0),(1,0),(0,1),(0,0)]");
    }

    #[test]
    fn test_deserialize_named_and_listed() {
        let named: PuzzleState = serde_json::from_str(
            r#"{"block": [1, 1], "red": [2, 0], "blue": [1, 1], "black": [0, 2]}"#,
        )
        .unwrap();
        assert_eq!(named, state3());

        let listed: PuzzleState = serde_json::from_str("[[0,0],[2,0],[1,1],[0,2]]").unwrap();
        assert_eq!(listed, state1());

        assert_eq!(
            serde_json::to_string(&state1()).unwrap(),
            "[[0,0],[2,0],[1,1],[0,2]]"
        );
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<PuzzleState>("[[0,0],[2,0],[1,1]]").is_err());
        assert!(serde_json::from_str::<PuzzleState>("[[0,0],[2,0],[1,1],[1,1]]").is_err());
        assert!(serde_json::from_str::<PuzzleState>(
            r#"{"block": [0, 3], "red": [2, 0], "blue": [1, 1], "black": [0, 2]}"#
        )
        .is_err());
    }

    fn arb_state() -> impl Strategy<Value = PuzzleState> {
        prop::array::uniform4((0..BOARD_SIZE, 0..BOARD_SIZE))
            .prop_filter("blue and black shoes may not share a cell", |cells| {
                cells[2] != cells[3]
            })
            .prop_map(state)
    }

    proptest! {
        #[test]
        fn test_goal_iff_red_meets_blue(s in arb_state()) {
            prop_assert_eq!(
                s.is_goal(),
                s.position(Piece::RedShoe) == s.position(Piece::BlueShoe)
            );
        }

        #[test]
        fn test_legal_moves_stay_valid(s in arb_state()) {
            for direction in s.legal_moves().directions() {
                let next = s.successor(direction).unwrap();
                prop_assert!(PuzzleState::new(next.positions()).is_ok());
                prop_assert_eq!(next.position(Piece::Block), s.position(Piece::Block).neighbor(direction));
            }
        }
    }
}
