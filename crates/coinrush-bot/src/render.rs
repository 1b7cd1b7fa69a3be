//! Console rendering of one agent's 5x5 observation window.
//!
//! Pure presentation: builds a multi-line string, one glyph per visible
//! cell, centered on the agent. Off-board cells draw as walls, since the
//! boundary blocks movement exactly like one.

use coinrush_nav::frame;
use coinrush_types::{LocalView, Offset, VIEW_RADIUS};

/// Glyph for the observing agent's own cell.
const GLYPH_SELF: &str = "  ❖  ";
/// Glyph for walls and off-board cells.
const GLYPH_WALL: &str = "  ▨  ";
/// Glyph for a visible teammate.
const GLYPH_TEAMMATE: &str = "  ☮  ";
/// Glyph for a visible enemy.
const GLYPH_ENEMY: &str = "  ☉  ";
/// Glyph for open floor.
const GLYPH_FLOOR: &str = "  □  ";

/// Render the view as a 5x5 glyph grid, one row per line.
pub fn render_board(view: &LocalView) -> String {
    let mut out = String::new();
    for row in -VIEW_RADIUS..=VIEW_RADIUS {
        for col in -VIEW_RADIUS..=VIEW_RADIUS {
            out.push_str(cell_glyph(view, Offset::new(row, col)));
        }
        out.push('\n');
    }
    out
}

/// The glyph for one window cell. Blocking entities win over coins so a
/// coin behind a wall does not read as collectible.
fn cell_glyph(view: &LocalView, offset: Offset) -> &'static str {
    if offset == Offset::ORIGIN {
        return GLYPH_SELF;
    }
    let world = frame::to_world(view.current_position, offset);
    if !world.on_board() || view.walls.contains(&world) {
        return GLYPH_WALL;
    }
    if view.teammates.contains(&world) {
        return GLYPH_TEAMMATE;
    }
    if view.enemies.contains(&world) {
        return GLYPH_ENEMY;
    }
    if view.coin3.contains(&world) {
        return "  3  ";
    }
    if view.coin2.contains(&world) {
        return "  2  ";
    }
    if view.coin1.contains(&world) {
        return "  1  ";
    }
    GLYPH_FLOOR
}
