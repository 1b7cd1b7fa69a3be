//! The occupancy oracle: whether a relative cell is blocked for movement.
//!
//! A cell is blocked when it falls off the fixed board or coincides with a
//! wall, a teammate, or an enemy in the current view. Coins never block.
//! This is a pure function of the view; the same view always gives the
//! same answer.

use coinrush_types::{LocalView, Offset};

use crate::frame;

/// Check whether the cell at `offset` (agent frame) is blocked in `view`.
pub fn is_blocked(view: &LocalView, offset: Offset) -> bool {
    let world = frame::to_world(view.current_position, offset);
    if !world.on_board() {
        return true;
    }

    view.walls.contains(&world)
        || view.teammates.contains(&world)
        || view.enemies.contains(&world)
}
