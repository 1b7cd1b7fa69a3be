//! Pure per-agent decision core for the coinrush bot.
//!
//! Everything in this crate is a function of one [`LocalView`] and a small
//! amount of per-agent state carried across cycles (the objective fixation
//! and the exploration momentum). Nothing here touches the transport; the
//! bot binary feeds views in and publishes the directions that come out.
//!
//! # Modules
//!
//! - [`frame`] -- Conversion between the world frame and the agent frame
//! - [`occupancy`] -- Whether a relative cell is blocked for movement
//! - [`search`] -- Bounded shortest-path search inside the visible window
//! - [`objective`] -- Per-agent commitment to a reachable coin
//! - [`explore`] -- Momentum-weighted random walk when no coin is reachable
//!
//! [`LocalView`]: coinrush_types::LocalView

pub mod explore;
pub mod frame;
pub mod objective;
pub mod occupancy;
pub mod search;

// Re-export primary entry points at crate root.
pub use explore::{MOMENTUM_DECAY, MOMENTUM_MAX, MomentumState};
pub use objective::ObjectiveFixation;
pub use occupancy::is_blocked;
pub use search::find_path;
