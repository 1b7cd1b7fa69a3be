//! Error types for the bot binary.
//!
//! Uses `thiserror` for typed errors surfaced through the whole pipeline:
//! configuration loading, NATS connectivity, and observation-contract
//! violations. Unreachable objectives and trapped agents are *not* errors
//! and never appear here; they are ordinary decision outcomes.

use coinrush_types::PlayerName;

/// Errors that can occur during bot operation.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// Failed to connect to or communicate with the NATS server.
    #[error("NATS error: {0}")]
    Nats(String),

    /// An observation payload violated the wire contract for one agent.
    ///
    /// Fatal for that agent's decision loop: a defaulted or guessed view
    /// would corrupt its fixation and momentum state, so the loop halts
    /// instead of emitting an arbitrary move.
    #[error("malformed observation for {player}: {message}")]
    Contract {
        /// The agent whose observation was malformed.
        player: PlayerName,
        /// What was wrong with the payload.
        message: String,
    },
}
