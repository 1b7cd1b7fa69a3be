//! The inbound actor: drains the game subscriptions into shared state.
//!
//! Three small tasks, one per subscription, so a burst on one subject never
//! delays another. None of them ever blocks on decision logic; they write
//! into per-agent slots, update the standings, or raise the termination
//! flag, and go back to the stream.

use std::sync::Arc;

use futures::StreamExt as _;
use tracing::{debug, error, info, warn};

use coinrush_types::{GAME_OVER_TEXT, LOBBY_NOT_FOUND_TEXT};

use crate::error::BotError;
use crate::nats::GameClient;
use crate::state::SharedState;

/// Classification of a lobby notice payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyEvent {
    /// The match ended; the scheduler must abort mid-round.
    GameOver,
    /// A notice the bot deliberately stays quiet about.
    Ignored,
    /// Informational server text, surfaced to the operator.
    Info,
}

/// Classify a lobby notice. The game-over sentinel is matched exactly.
pub fn classify_lobby_message(text: &str) -> LobbyEvent {
    if text == GAME_OVER_TEXT {
        LobbyEvent::GameOver
    } else if text == LOBBY_NOT_FOUND_TEXT {
        LobbyEvent::Ignored
    } else {
        LobbyEvent::Info
    }
}

/// Subscribe to the three inbound subjects and spawn a drain task for each.
///
/// # Errors
///
/// Returns [`BotError::Nats`] if any subscription fails. Individual
/// malformed messages after startup never abort the tasks.
pub async fn start(
    client: &GameClient,
    state: Arc<SharedState>,
    lobby: &str,
) -> Result<(), BotError> {
    let mut lobby_sub = client.subscribe_lobby(lobby).await?;
    let mut views_sub = client.subscribe_game_states(lobby).await?;
    let mut scores_sub = client.subscribe_scores(lobby).await?;
    info!(lobby = lobby, "inbound subscriptions established");

    let lobby_state = Arc::clone(&state);
    tokio::spawn(async move {
        while let Some(message) = lobby_sub.next().await {
            let text = String::from_utf8_lossy(&message.payload);
            match classify_lobby_message(&text) {
                LobbyEvent::GameOver => {
                    info!("game over notice received, raising termination flag");
                    lobby_state.set_game_over();
                }
                LobbyEvent::Ignored => {}
                LobbyEvent::Info => info!(server_msg = %text, "lobby notice"),
            }
        }
        debug!("lobby subscription ended");
    });

    let views_state = Arc::clone(&state);
    tokio::spawn(async move {
        while let Some(message) = views_sub.next().await {
            let subject = message.subject.to_string();
            let Some(player) = GameClient::player_from_subject(&subject) else {
                warn!(subject = subject, "unparseable observation subject, skipping");
                continue;
            };
            let Some(slot) = views_state.slot(&player) else {
                // Another lobby member's view; the wildcard catches it too.
                debug!(player = %player, "observation for an uncontrolled player");
                continue;
            };

            match GameClient::deserialize_view(&player, &message.payload) {
                Ok(view) => {
                    debug!(
                        player = %player,
                        position = %view.current_position,
                        "fresh observation stored"
                    );
                    slot.publish(view);
                }
                Err(e) => {
                    // Contract violation: poison the slot so the agent's
                    // loop halts instead of moving on a guessed view.
                    error!(player = %player, error = %e, "malformed observation");
                    slot.poison(e);
                }
            }
        }
        debug!("observation subscription ended");
    });

    tokio::spawn(async move {
        while let Some(message) = scores_sub.next().await {
            match GameClient::deserialize_scores(&message.payload) {
                Ok(scores) => {
                    let standings: Vec<String> = scores
                        .iter()
                        .map(|(team, points)| format!("{team}:{points}"))
                        .collect();
                    info!(standings = standings.join("  "), "scores update");
                    state.update_scores(scores);
                }
                Err(e) => {
                    warn!(error = %e, "failed to deserialize scores payload");
                }
            }
        }
        debug!("scores subscription ended");
    });

    Ok(())
}
