//! Board geometry: world positions, agent-frame offsets, and directions.
//!
//! Two coordinate frames exist. The *world frame* is absolute: `(row, col)`
//! pairs bounded by the fixed [`BOARD_SIZE`]. The *agent frame* is relative
//! to one agent's current cell, origin at the agent, visible out to
//! [`VIEW_RADIUS`] on each axis (a 5x5 window). Conversion between the two
//! requires the agent's current world position, which arrives with every
//! observation.
//!
//! Positions travel on the wire as two-element JSON arrays `[row, col]`.

use serde::{Deserialize, Serialize};

/// Side length of the fixed square board, in cells.
pub const BOARD_SIZE: i32 = 10;

/// Maximum per-axis reach of an agent's observation window.
///
/// The window is Chebyshev: an offset is visible when both coordinates lie
/// in `-VIEW_RADIUS..=VIEW_RADIUS`.
pub const VIEW_RADIUS: i32 = 2;

/// An absolute cell on the board, in the world frame.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Position {
    /// Row index, `0..BOARD_SIZE` when on the board.
    pub row: i32,
    /// Column index, `0..BOARD_SIZE` when on the board.
    pub col: i32,
}

impl Position {
    /// Create a position from row and column indices.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Check whether this position lies on the fixed board.
    pub const fn on_board(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Manhattan distance to another position.
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }
}

impl From<[i32; 2]> for Position {
    fn from(pair: [i32; 2]) -> Self {
        let [row, col] = pair;
        Self { row, col }
    }
}

impl From<Position> for [i32; 2] {
    fn from(pos: Position) -> Self {
        [pos.row, pos.col]
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A cell relative to an agent's current position, in the agent frame.
///
/// The agent itself sits at the origin `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset {
    /// Row delta from the agent's cell.
    pub row: i32,
    /// Column delta from the agent's cell.
    pub col: i32,
}

impl Offset {
    /// The agent's own cell.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create an offset from row and column deltas.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Check whether this offset lies inside the visibility window.
    pub const fn in_window(self) -> bool {
        self.row >= -VIEW_RADIUS
            && self.row <= VIEW_RADIUS
            && self.col >= -VIEW_RADIUS
            && self.col <= VIEW_RADIUS
    }

    /// The offset one unit step away in the given direction.
    ///
    /// Offsets are confined to the tiny visibility window, so the
    /// saturating arithmetic never engages in practice.
    pub const fn stepped(self, direction: Direction) -> Self {
        let delta = direction.offset();
        Self {
            row: self.row.saturating_add(delta.row),
            col: self.col.saturating_add(delta.col),
        }
    }
}

/// One of the four unit move directions accepted by the game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Decreasing row.
    Up,
    /// Increasing row.
    Down,
    /// Decreasing column.
    Left,
    /// Increasing column.
    Right,
}

impl Direction {
    /// All four directions in a fixed enumeration order.
    ///
    /// This order is load-bearing: the path search visits neighbors in it,
    /// which (together with stable frontier tie-breaking) makes the search
    /// deterministic.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The unit agent-frame offset this direction moves by.
    pub const fn offset(self) -> Offset {
        match self {
            Self::Up => Offset { row: -1, col: 0 },
            Self::Down => Offset { row: 1, col: 0 },
            Self::Left => Offset { row: 0, col: -1 },
            Self::Right => Offset { row: 0, col: 1 },
        }
    }

    /// The wire token the game server accepts for this direction.
    pub const fn command(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }

    /// Recover a direction from a unit offset, or `None` if the offset is
    /// not a unit step.
    pub const fn from_offset(offset: Offset) -> Option<Self> {
        match (offset.row, offset.col) {
            (-1, 0) => Some(Self::Up),
            (1, 0) => Some(Self::Down),
            (0, -1) => Some(Self::Left),
            (0, 1) => Some(Self::Right),
            _ => None,
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_wire_format_is_array() {
        let pos = Position::new(5, 7);
        let json = serde_json::to_string(&pos).ok();
        assert_eq!(json.as_deref(), Some("[5,7]"));

        let back: Result<Position, _> = serde_json::from_str("[5,7]");
        assert_eq!(back.ok(), Some(pos));
    }

    #[test]
    fn board_bounds() {
        assert!(Position::new(0, 0).on_board());
        assert!(Position::new(9, 9).on_board());
        assert!(!Position::new(-1, 0).on_board());
        assert!(!Position::new(0, 10).on_board());
        assert!(!Position::new(10, 3).on_board());
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(2, 3);
        let b = Position::new(5, 1);
        assert_eq!(a.manhattan_distance(b), 5);
        assert_eq!(b.manhattan_distance(a), 5);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn window_membership() {
        assert!(Offset::ORIGIN.in_window());
        assert!(Offset::new(-2, 2).in_window());
        assert!(Offset::new(2, -2).in_window());
        assert!(!Offset::new(3, 0).in_window());
        assert!(!Offset::new(0, -3).in_window());
    }

    #[test]
    fn direction_offsets_are_unit_steps() {
        for dir in Direction::ALL {
            let o = dir.offset();
            assert_eq!(o.row.abs_diff(0).saturating_add(o.col.abs_diff(0)), 1);
            assert_eq!(Direction::from_offset(o), Some(dir));
        }
    }

    #[test]
    fn from_offset_rejects_non_unit_steps() {
        assert_eq!(Direction::from_offset(Offset::ORIGIN), None);
        assert_eq!(Direction::from_offset(Offset::new(1, 1)), None);
        assert_eq!(Direction::from_offset(Offset::new(-2, 0)), None);
    }

    #[test]
    fn command_tokens_match_wire() {
        assert_eq!(Direction::Up.command(), "UP");
        assert_eq!(Direction::Down.command(), "DOWN");
        assert_eq!(Direction::Left.command(), "LEFT");
        assert_eq!(Direction::Right.command(), "RIGHT");
    }

    #[test]
    fn stepped_moves_one_cell() {
        let from = Offset::new(1, -1);
        assert_eq!(from.stepped(Direction::Up), Offset::new(0, -1));
        assert_eq!(from.stepped(Direction::Right), Offset::new(1, 0));
    }
}
