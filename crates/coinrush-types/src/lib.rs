//! Shared type definitions for the coinrush game bot.
//!
//! This crate is the single source of truth for the types exchanged with the
//! game server and shared between the decision core and the bot binary.
//!
//! # Modules
//!
//! - [`names`] -- Type-safe string wrappers for player and team identities
//! - [`grid`] -- Board geometry: positions, relative offsets, directions
//! - [`observation`] -- The egocentric view payload delivered per agent per
//!   cycle, plus lobby/score wire types

pub mod grid;
pub mod names;
pub mod observation;

// Re-export all public types at crate root for convenience.
pub use grid::{BOARD_SIZE, Direction, Offset, Position, VIEW_RADIUS};
pub use names::{PlayerName, TeamName};
pub use observation::{
    CoinTier, GAME_OVER_TEXT, JoinRequest, LOBBY_NOT_FOUND_TEXT, LocalView, ScoreBoard,
};
