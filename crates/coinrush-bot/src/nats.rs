//! NATS pub/sub integration for observation intake and move submission.
//!
//! The game server publishes each player's egocentric view on
//! `games.{lobby}.{player}.game_state`, free-text lobby notices on
//! `games.{lobby}.lobby`, and team standings on `games.{lobby}.scores`.
//! The bot joins players by publishing to `game.join`, starts the match on
//! `games.{lobby}.start`, and submits one move token per decision on
//! `games.{lobby}.{player}.move`.

use coinrush_types::{Direction, JoinRequest, LocalView, PlayerName, ScoreBoard};
use tracing::{debug, info};

use crate::error::BotError;

/// NATS client wrapper for the game bot.
///
/// Manages a single connection and provides methods for the handful of
/// subjects the game protocol uses.
pub struct GameClient {
    client: async_nats::Client,
}

impl GameClient {
    /// Connect to a NATS server.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, BotError> {
        info!(url = url, "connecting to NATS server");
        let client = async_nats::connect(url)
            .await
            .map_err(|e| BotError::Nats(format!("failed to connect to {url}: {e}")))?;
        info!("NATS connection established");
        Ok(Self { client })
    }

    /// Subscribe to the lobby notice subject.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if the subscription fails.
    pub async fn subscribe_lobby(
        &self,
        lobby: &str,
    ) -> Result<async_nats::Subscriber, BotError> {
        self.subscribe(format!("games.{lobby}.lobby")).await
    }

    /// Subscribe to every player's observation subject in the lobby.
    ///
    /// Returns a subscription yielding messages matching
    /// `games.{lobby}.*.game_state`; the player name is the third subject
    /// token.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if the subscription fails.
    pub async fn subscribe_game_states(
        &self,
        lobby: &str,
    ) -> Result<async_nats::Subscriber, BotError> {
        self.subscribe(format!("games.{lobby}.*.game_state")).await
    }

    /// Subscribe to the team standings subject.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if the subscription fails.
    pub async fn subscribe_scores(
        &self,
        lobby: &str,
    ) -> Result<async_nats::Subscriber, BotError> {
        self.subscribe(format!("games.{lobby}.scores")).await
    }

    async fn subscribe(&self, subject: String) -> Result<async_nats::Subscriber, BotError> {
        debug!(subject = subject, "subscribing");
        self.client
            .subscribe(subject.clone())
            .await
            .map_err(|e| BotError::Nats(format!("failed to subscribe to {subject}: {e}")))
    }

    /// Publish a join request for one controlled player.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if serialization or publishing fails.
    pub async fn publish_join(&self, join: &JoinRequest) -> Result<(), BotError> {
        let payload = serde_json::to_vec(join)
            .map_err(|e| BotError::Nats(format!("failed to serialize join request: {e}")))?;
        debug!(
            player = %join.player_name,
            team = %join.team_name,
            lobby = join.lobby_name,
            "publishing join request"
        );
        self.client
            .publish("game.join", payload.into())
            .await
            .map_err(|e| BotError::Nats(format!("failed to publish join request: {e}")))
    }

    /// Publish the start signal for the lobby.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if publishing fails.
    pub async fn publish_start(&self, lobby: &str) -> Result<(), BotError> {
        let subject = format!("games.{lobby}.start");
        info!(subject = subject, "publishing start signal");
        self.client
            .publish(subject.clone(), "START".into())
            .await
            .map_err(|e| BotError::Nats(format!("failed to publish to {subject}: {e}")))
    }

    /// Emit one move command for a player: the outbound half of the
    /// decision loop. The server receives the direction token verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if publishing fails.
    pub async fn emit_command(
        &self,
        lobby: &str,
        player: &PlayerName,
        direction: Direction,
    ) -> Result<(), BotError> {
        let subject = format!("games.{lobby}.{player}.move");
        debug!(
            subject = subject,
            player = %player,
            command = direction.command(),
            "emitting move command"
        );
        self.client
            .publish(subject.clone(), direction.command().into())
            .await
            .map_err(|e| BotError::Nats(format!("failed to publish to {subject}: {e}")))
    }

    /// Flush all pending messages to the server.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if the flush fails.
    pub async fn flush(&self) -> Result<(), BotError> {
        self.client
            .flush()
            .await
            .map_err(|e| BotError::Nats(format!("flush failed: {e}")))
    }

    /// Extract the player name from an observation subject.
    ///
    /// Subject format: `games.{lobby}.{player}.game_state`. Returns `None`
    /// if the subject does not match the expected shape.
    pub fn player_from_subject(subject: &str) -> Option<PlayerName> {
        let mut parts = subject.split('.');
        if parts.next() != Some("games") {
            return None;
        }
        let _lobby = parts.next()?;
        let player = parts.next()?;
        if parts.next() != Some("game_state") || parts.next().is_some() {
            return None;
        }
        Some(PlayerName::from(player))
    }

    /// Deserialize an observation payload into a [`LocalView`].
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Contract`] if the payload is malformed or missing
    /// fields -- a fatal contract violation for the affected agent.
    pub fn deserialize_view(player: &PlayerName, data: &[u8]) -> Result<LocalView, BotError> {
        serde_json::from_slice(data).map_err(|e| BotError::Contract {
            player: player.clone(),
            message: format!("{e}"),
        })
    }

    /// Deserialize a standings payload into a [`ScoreBoard`].
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if the payload is not a team-to-score map.
    pub fn deserialize_scores(data: &[u8]) -> Result<ScoreBoard, BotError> {
        serde_json::from_slice(data)
            .map_err(|e| BotError::Nats(format!("failed to deserialize scores: {e}")))
    }
}

impl std::fmt::Debug for GameClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameClient").field("connected", &true).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn player_extracted_from_valid_subject() {
        let player = GameClient::player_from_subject("games.BotLobby.Alex.game_state");
        assert_eq!(player, Some(PlayerName::from("Alex")));
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        assert_eq!(GameClient::player_from_subject("tick.1.Alex.game_state"), None);
    }

    #[test]
    fn wrong_suffix_is_rejected() {
        assert_eq!(GameClient::player_from_subject("games.BotLobby.Alex.move"), None);
        assert_eq!(GameClient::player_from_subject("games.BotLobby.scores"), None);
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert_eq!(
            GameClient::player_from_subject("games.BotLobby.Alex.game_state.extra"),
            None
        );
    }

    #[test]
    fn deserialize_valid_view() {
        let payload = serde_json::json!({
            "currentPosition": [5, 5],
            "walls": [],
            "teammatePositions": [],
            "enemyPositions": [],
            "coin1": [[5, 7]],
            "coin2": [],
            "coin3": [],
        });
        let bytes = serde_json::to_vec(&payload).unwrap();
        let player = PlayerName::from("Alex");
        let view = GameClient::deserialize_view(&player, &bytes).unwrap();
        assert_eq!(view.current_position, coinrush_types::Position::new(5, 5));
    }

    #[test]
    fn malformed_view_is_a_contract_violation() {
        let player = PlayerName::from("Alex");
        let result = GameClient::deserialize_view(&player, b"not valid json");
        assert!(matches!(result, Err(BotError::Contract { .. })));
    }

    #[test]
    fn missing_entity_set_is_a_contract_violation() {
        // Silently defaulting an absent coin list would corrupt fixation
        // state, so the parse must fail instead.
        let payload = serde_json::json!({
            "currentPosition": [5, 5],
            "walls": [],
            "teammatePositions": [],
            "enemyPositions": [],
            "coin1": [],
            "coin2": [],
        });
        let bytes = serde_json::to_vec(&payload).unwrap();
        let player = PlayerName::from("Alex");
        let result = GameClient::deserialize_view(&player, &bytes);
        assert!(matches!(result, Err(BotError::Contract { .. })));
    }

    #[test]
    fn deserialize_scores_map() {
        let bytes = serde_json::to_vec(&serde_json::json!({"alpha": 12, "beta": 7})).unwrap();
        let scores = GameClient::deserialize_scores(&bytes).unwrap();
        assert_eq!(scores.get(&coinrush_types::TeamName::from("alpha")), Some(&12));
        assert_eq!(scores.get(&coinrush_types::TeamName::from("beta")), Some(&7));
    }
}
