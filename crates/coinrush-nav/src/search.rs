//! Bounded shortest-path search inside the visible window.
//!
//! An informed (A*-style) search over the agent-frame grid, restricted to
//! offsets within the visibility window. Each step costs 1 and the heuristic
//! is the Manhattan distance from the step's world cell to the target, so
//! the first expansion of the target yields a shortest path.
//!
//! The search is deliberately myopic: the agent knows nothing beyond its
//! window, and the view it searches over is discarded after one decision.
//! Every cycle recomputes from scratch -- walls do not move, but teammates
//! and enemies do, so cached routes would go stale immediately.
//!
//! Returning `None` is the expected, frequent outcome (target outside the
//! window, or behind an unavoidable obstacle), not an error; it is what
//! hands control to the exploration fallback.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use coinrush_types::{Direction, LocalView, Offset, Position};

use crate::frame;
use crate::occupancy;

/// One node in the search arena, alive only for the duration of a single
/// `find_path` call. Predecessor links are arena indices; the chain is
/// walked once during reconstruction and then dropped with the arena.
struct PathNode {
    /// The agent-frame cell this node stands on.
    offset: Offset,
    /// Arena index of the node this one was reached from.
    prev: Option<usize>,
    /// Accumulated step cost from the start.
    cost: u32,
}

/// Find a shortest route from the agent's cell to `target`, confined to the
/// visible window.
///
/// Returns the step sequence oldest-first, or `None` when the frontier
/// empties without reaching the target. A target on the agent's own cell
/// yields an empty sequence.
///
/// Frontier ordering is ascending `(cost + heuristic)` with ties broken by
/// insertion order, so identical inputs always produce identical paths.
pub fn find_path(view: &LocalView, target: Position) -> Option<Vec<Direction>> {
    let agent = view.current_position;

    let mut arena = vec![PathNode {
        offset: Offset::ORIGIN,
        prev: None,
        cost: 0,
    }];
    let mut best: BTreeMap<Offset, u32> = BTreeMap::new();
    best.insert(Offset::ORIGIN, 0);

    // Min-heap keyed by (estimated total, insertion sequence, arena index).
    // The sequence number makes tie-breaking stable.
    let mut frontier: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
    let mut sequence: u64 = 0;
    frontier.push(Reverse((agent.manhattan_distance(target), sequence, 0)));

    while let Some(Reverse((_, _, index))) = frontier.pop() {
        let (offset, cost) = match arena.get(index) {
            Some(node) => (node.offset, node.cost),
            None => continue,
        };

        // A cheaper route to this cell was queued after this entry.
        if best.get(&offset).is_some_and(|&recorded| cost > recorded) {
            continue;
        }

        if frame::to_world(agent, offset) == target {
            return Some(reconstruct(&arena, index));
        }

        for direction in Direction::ALL {
            let next = offset.stepped(direction);
            if !next.in_window() || occupancy::is_blocked(view, next) {
                continue;
            }

            let next_cost = cost.saturating_add(1);
            if best.get(&next).is_some_and(|&recorded| next_cost >= recorded) {
                continue;
            }
            best.insert(next, next_cost);

            let estimate = next_cost
                .saturating_add(frame::to_world(agent, next).manhattan_distance(target));
            let child = arena.len();
            arena.push(PathNode {
                offset: next,
                prev: Some(index),
                cost: next_cost,
            });
            sequence = sequence.saturating_add(1);
            frontier.push(Reverse((estimate, sequence, child)));
        }
    }

    None
}

/// Walk predecessor links from the goal node back to the start, then emit
/// the unit steps oldest-first.
fn reconstruct(arena: &[PathNode], goal: usize) -> Vec<Direction> {
    let mut offsets = Vec::new();
    let mut current = Some(goal);
    while let Some(index) = current {
        let Some(node) = arena.get(index) else { break };
        offsets.push(node.offset);
        current = node.prev;
    }
    offsets.reverse();

    offsets
        .windows(2)
        .filter_map(|pair| {
            let from = pair.first()?;
            let to = pair.get(1)?;
            Direction::from_offset(Offset::new(
                to.row.saturating_sub(from.row),
                to.col.saturating_sub(from.col),
            ))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn empty_view_at(row: i32, col: i32) -> LocalView {
        serde_json::from_value(serde_json::json!({
            "currentPosition": [row, col],
            "walls": [],
            "teammatePositions": [],
            "enemyPositions": [],
            "coin1": [],
            "coin2": [],
            "coin3": [],
        }))
        .unwrap()
    }

    #[test]
    fn straight_run_to_a_coin_two_cells_right() {
        let view = empty_view_at(5, 5);
        let path = find_path(&view, Position::new(5, 7)).unwrap();
        assert_eq!(path, vec![Direction::Right, Direction::Right]);
    }

    #[test]
    fn unobstructed_path_length_equals_manhattan_distance() {
        let view = empty_view_at(5, 5);
        for target in [
            Position::new(3, 5),
            Position::new(7, 5),
            Position::new(4, 4),
            Position::new(6, 7),
            Position::new(3, 7),
        ] {
            let path = find_path(&view, target).unwrap();
            let expected = view.current_position.manhattan_distance(target);
            assert_eq!(u32::try_from(path.len()).unwrap(), expected, "target {target}");
        }
    }

    #[test]
    fn target_outside_the_window_is_unreachable() {
        let view = empty_view_at(5, 5);
        // Manhattan distance 3, but one axis at distance 3 leaves the window.
        assert_eq!(find_path(&view, Position::new(5, 8)), None);
        assert_eq!(find_path(&view, Position::new(1, 5)), None);
    }

    #[test]
    fn diagonal_corner_of_the_window_is_reachable() {
        // (2, 2) relative is inside the Chebyshev window at Manhattan
        // distance 4.
        let view = empty_view_at(5, 5);
        let path = find_path(&view, Position::new(7, 7)).unwrap();
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn path_routes_around_a_wall() {
        let mut view = empty_view_at(5, 5);
        view.walls.insert(Position::new(5, 6));
        let path = find_path(&view, Position::new(5, 7)).unwrap();
        // Detour: one step off the row, two along, one back.
        assert_eq!(path.len(), 4);

        // Replay the steps and verify no step lands on a blocked cell.
        let mut offset = Offset::ORIGIN;
        for step in &path {
            offset = offset.stepped(*step);
            assert!(!occupancy::is_blocked(&view, offset));
        }
        assert_eq!(frame::to_world(view.current_position, offset), Position::new(5, 7));
    }

    #[test]
    fn walled_off_target_is_unreachable() {
        let mut view = empty_view_at(5, 5);
        // Seal every cell adjacent to the target that lies in the window.
        view.walls.insert(Position::new(5, 6));
        view.walls.insert(Position::new(4, 7));
        view.walls.insert(Position::new(6, 7));
        assert_eq!(find_path(&view, Position::new(5, 7)), None);
    }

    #[test]
    fn teammates_and_enemies_block_like_walls() {
        let mut view = empty_view_at(5, 5);
        view.teammates.insert(Position::new(4, 5));
        view.enemies.insert(Position::new(5, 4));
        view.walls.insert(Position::new(6, 5));
        // Only Right is open from the start.
        let path = find_path(&view, Position::new(5, 6)).unwrap();
        assert_eq!(path, vec![Direction::Right]);
    }

    #[test]
    fn target_under_the_agent_yields_an_empty_path() {
        let view = empty_view_at(5, 5);
        let path = find_path(&view, Position::new(5, 5)).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn identical_inputs_give_identical_paths() {
        let mut view = empty_view_at(5, 5);
        view.walls.insert(Position::new(4, 6));
        let target = Position::new(3, 7);
        let first = find_path(&view, target);
        for _ in 0..10 {
            assert_eq!(find_path(&view, target), first);
        }
    }

    #[test]
    fn search_respects_the_board_edge() {
        let view = empty_view_at(0, 0);
        let path = find_path(&view, Position::new(2, 0)).unwrap();
        assert_eq!(path, vec![Direction::Down, Direction::Down]);
        // Off-board target can never be expanded.
        assert_eq!(find_path(&view, Position::new(-1, 0)), None);
    }
}
