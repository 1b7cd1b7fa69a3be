//! Conversion between the world frame and the agent frame.
//!
//! The two functions here are total and exact inverses of each other for
//! every cell that can actually occur: coordinates are confined to the
//! 10x10 board and the 5x5 window, so the saturating arithmetic never
//! engages in practice.

use coinrush_types::{Offset, Position};

/// Express a world cell relative to the agent's current cell.
pub const fn to_relative(agent: Position, world: Position) -> Offset {
    Offset {
        row: world.row.saturating_sub(agent.row),
        col: world.col.saturating_sub(agent.col),
    }
}

/// Resolve an agent-frame offset back to the world cell it names.
pub const fn to_world(agent: Position, offset: Offset) -> Position {
    Position {
        row: agent.row.saturating_add(offset.row),
        col: agent.col.saturating_add(offset.col),
    }
}

#[cfg(test)]
mod tests {
    use coinrush_types::VIEW_RADIUS;

    use super::*;

    #[test]
    fn agent_cell_is_the_origin() {
        let agent = Position::new(4, 6);
        assert_eq!(to_relative(agent, agent), Offset::ORIGIN);
        assert_eq!(to_world(agent, Offset::ORIGIN), agent);
    }

    #[test]
    fn round_trips_for_every_window_offset() {
        let agent = Position::new(5, 5);
        for row in -VIEW_RADIUS..=VIEW_RADIUS {
            for col in -VIEW_RADIUS..=VIEW_RADIUS {
                let offset = Offset::new(row, col);
                assert_eq!(to_relative(agent, to_world(agent, offset)), offset);
            }
        }
    }

    #[test]
    fn round_trips_for_every_board_cell() {
        let agent = Position::new(2, 8);
        for row in 0..10 {
            for col in 0..10 {
                let world = Position::new(row, col);
                assert_eq!(to_world(agent, to_relative(agent, world)), world);
            }
        }
    }

    #[test]
    fn relative_offsets_can_leave_the_board() {
        // An agent on the edge sees off-board cells; the conversion stays
        // total and the occupancy oracle is what rejects them.
        let agent = Position::new(0, 0);
        let world = to_world(agent, Offset::new(-1, -2));
        assert_eq!(world, Position::new(-1, -2));
        assert!(!world.on_board());
    }
}
