//! Momentum-weighted random walk for cycles with no reachable objective.
//!
//! Momentum biases the walk toward straight runs, which cross open floor
//! much faster than an unweighted random walk, while the decay guarantees
//! the agent eventually redirects even on a long empty corridor. Momentum
//! is kept as an integer in `0..=MOMENTUM_MAX` (the probability scalar at
//! 1/100 resolution) so state comparisons stay exact.
//!
//! A blocked facing direction always triggers a redirection attempt within
//! the same cycle; the walk never burns a cycle just discovering the block.

use coinrush_types::{Direction, LocalView};
use rand::Rng;

use crate::occupancy;

/// Upper bound of the momentum scale; a fresh direction starts here, which
/// makes the first continuation certain.
pub const MOMENTUM_MAX: u32 = 100;

/// Amount subtracted from momentum after each taken continuation.
pub const MOMENTUM_DECAY: u32 = 20;

/// Per-agent exploration state: the current facing direction and a decaying
/// bias toward keeping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MomentumState {
    facing: Direction,
    momentum: u32,
}

impl MomentumState {
    /// Start facing the given direction at full momentum.
    pub const fn new(facing: Direction) -> Self {
        Self {
            facing,
            momentum: MOMENTUM_MAX,
        }
    }

    /// The direction the agent is currently facing.
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Current momentum, in `0..=MOMENTUM_MAX`.
    pub const fn momentum(&self) -> u32 {
        self.momentum
    }

    /// Pick the next exploration step for this view.
    ///
    /// When the facing direction is unblocked, it is kept with probability
    /// `momentum / MOMENTUM_MAX`, decaying momentum by [`MOMENTUM_DECAY`]
    /// (floor 0). Otherwise -- facing blocked, or the continuation roll not
    /// taken -- a new direction is chosen among the unblocked ones (the sole
    /// survivor deterministically, several uniformly at random), momentum
    /// resets to [`MOMENTUM_MAX`], and the new facing is persisted.
    ///
    /// Returns `None` when all four directions are blocked: the agent is
    /// trapped, and the caller reports it instead of issuing a command.
    pub fn next_direction<R: Rng>(
        &mut self,
        view: &LocalView,
        rng: &mut R,
    ) -> Option<Direction> {
        if !occupancy::is_blocked(view, self.facing.offset())
            && rng.random_range(0..MOMENTUM_MAX) < self.momentum
        {
            self.momentum = self.momentum.saturating_sub(MOMENTUM_DECAY);
            return Some(self.facing);
        }

        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| !occupancy::is_blocked(view, direction.offset()))
            .collect();

        let chosen = match open.as_slice() {
            [] => return None,
            [only] => *only,
            several => {
                let index = rng.random_range(0..several.len());
                several.get(index).copied().unwrap_or(self.facing)
            }
        };

        self.facing = chosen;
        self.momentum = MOMENTUM_MAX;
        Some(chosen)
    }
}

impl Default for MomentumState {
    fn default() -> Self {
        Self::new(Direction::Up)
    }
}
