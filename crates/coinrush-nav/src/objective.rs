//! Per-agent commitment to a reachable coin.
//!
//! The fixation is the only decision state carried across cycles besides
//! exploration momentum. Committing to one objective until it disappears or
//! becomes unreachable prevents oscillation: without it, an agent standing
//! between two equally-good coins would flip targets every cycle as set
//! ordering shifted under it.

use coinrush_types::{Direction, LocalView, Position};

use crate::search;

/// The objective one agent is currently pursuing, persisted across cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectiveFixation {
    current: Option<Position>,
}

impl ObjectiveFixation {
    /// A fixation with no committed objective.
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// The objective currently committed to, if any.
    pub const fn current(&self) -> Option<Position> {
        self.current
    }

    /// Resolve which objective to pursue this cycle.
    ///
    /// `candidates` must be in priority order (highest value first).
    ///
    /// 1. A persisted objective that is still a candidate and still
    ///    reachable is kept unchanged, even when a higher-priority
    ///    candidate has appeared.
    /// 2. Otherwise the first reachable candidate in order becomes the new
    ///    fixation.
    /// 3. When nothing is reachable the fixation is cleared and `None` is
    ///    returned, handing the cycle to the exploration fallback.
    ///
    /// A candidate the agent is already standing on resolves to an empty
    /// path; it is treated as absent, since the server collects coins on
    /// entry and such a cell is stale by the time it is seen here.
    pub fn resolve(
        &mut self,
        view: &LocalView,
        candidates: &[Position],
    ) -> Option<(Position, Vec<Direction>)> {
        // Invalidate a fixation that vanished from the objective set.
        if let Some(held) = self.current
            && !candidates.contains(&held)
        {
            self.current = None;
        }

        if let Some(held) = self.current
            && let Some(path) = search::find_path(view, held)
            && !path.is_empty()
        {
            return Some((held, path));
        }

        for &candidate in candidates {
            if self.current == Some(candidate) {
                // Already tried above and found unreachable this cycle.
                continue;
            }
            if let Some(path) = search::find_path(view, candidate)
                && !path.is_empty()
            {
                self.current = Some(candidate);
                return Some((candidate, path));
            }
        }

        self.current = None;
        None
    }
}
