//! Wire payload types exchanged with the game server.
//!
//! The egocentric view is the **only** information an agent receives about
//! the board. If something is not in the view, the agent does not know about
//! it. Field names mirror the server's JSON keys exactly; a payload missing
//! any field is a contract violation and fails deserialization rather than
//! being defaulted, since a silently-empty entity set would corrupt the
//! per-agent decision state downstream.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::names::{PlayerName, TeamName};

/// The lobby message the server sends when the match ends.
pub const GAME_OVER_TEXT: &str = "Game Over: All coins have been collected";

/// The lobby message the server sends for a join against an unknown lobby.
pub const LOBBY_NOT_FOUND_TEXT: &str = "Lobby name not found.";

/// Latest team standings, as delivered on the score subject.
pub type ScoreBoard = BTreeMap<TeamName, i64>;

/// The three coin denominations on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CoinTier {
    /// Lowest value.
    One,
    /// Middle value.
    Two,
    /// Highest value.
    Three,
}

impl CoinTier {
    /// Objective ranking used when choosing what to chase: highest value
    /// first.
    pub const PRIORITY: [Self; 3] = [Self::Three, Self::Two, Self::One];
}

/// One agent's egocentric snapshot of the board for one decision cycle.
///
/// A view is paired with exactly one agent and is replaced wholesale on each
/// inbound observation -- never merged with a prior view. All positions are
/// world-frame; entities outside the agent's 5x5 window simply do not appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalView {
    /// The observing agent's own cell.
    #[serde(rename = "currentPosition")]
    pub current_position: Position,
    /// Wall cells visible in the window.
    pub walls: BTreeSet<Position>,
    /// Teammate cells visible in the window.
    #[serde(rename = "teammatePositions")]
    pub teammates: BTreeSet<Position>,
    /// Enemy cells visible in the window.
    #[serde(rename = "enemyPositions")]
    pub enemies: BTreeSet<Position>,
    /// Visible coins of the lowest denomination.
    pub coin1: BTreeSet<Position>,
    /// Visible coins of the middle denomination.
    pub coin2: BTreeSet<Position>,
    /// Visible coins of the highest denomination.
    pub coin3: BTreeSet<Position>,
}

impl LocalView {
    /// The visible coins of one denomination.
    pub const fn coins(&self, tier: CoinTier) -> &BTreeSet<Position> {
        match tier {
            CoinTier::One => &self.coin1,
            CoinTier::Two => &self.coin2,
            CoinTier::Three => &self.coin3,
        }
    }

    /// All visible coins flattened into objective priority order: every
    /// coin-3 before every coin-2 before every coin-1, each tier in
    /// deterministic set order.
    pub fn objective_candidates(&self) -> Vec<Position> {
        CoinTier::PRIORITY
            .iter()
            .flat_map(|&tier| self.coins(tier).iter().copied())
            .collect()
    }
}

/// The join payload published once per controlled player before the match
/// starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    /// The lobby to join.
    pub lobby_name: String,
    /// The team this player plays for.
    pub team_name: TeamName,
    /// The player's name; also the subject segment its observations arrive
    /// under.
    pub player_name: PlayerName,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_view_json() -> serde_json::Value {
        serde_json::json!({
            "currentPosition": [5, 5],
            "walls": [[4, 4]],
            "teammatePositions": [[5, 3]],
            "enemyPositions": [[7, 5]],
            "coin1": [[5, 7]],
            "coin2": [],
            "coin3": [[3, 5]],
        })
    }

    #[test]
    fn view_deserializes_from_wire_names() {
        let view: LocalView = serde_json::from_value(sample_view_json()).unwrap();
        assert_eq!(view.current_position, Position::new(5, 5));
        assert!(view.walls.contains(&Position::new(4, 4)));
        assert!(view.teammates.contains(&Position::new(5, 3)));
        assert!(view.enemies.contains(&Position::new(7, 5)));
        assert!(view.coin1.contains(&Position::new(5, 7)));
        assert!(view.coin2.is_empty());
        assert!(view.coin3.contains(&Position::new(3, 5)));
    }

    #[test]
    fn missing_field_is_a_contract_violation() {
        let mut value = sample_view_json();
        value.as_object_mut().unwrap().remove("coin2");
        let result: Result<LocalView, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut value = sample_view_json();
        value
            .as_object_mut()
            .unwrap()
            .insert("serverExtra".to_owned(), serde_json::json!(42));
        let result: Result<LocalView, _> = serde_json::from_value(value);
        assert!(result.is_ok());
    }

    #[test]
    fn candidates_rank_high_value_coins_first() {
        let view: LocalView = serde_json::from_value(sample_view_json()).unwrap();
        let candidates = view.objective_candidates();
        assert_eq!(
            candidates,
            vec![Position::new(3, 5), Position::new(5, 7)]
        );
    }

    #[test]
    fn join_request_wire_shape() {
        let join = JoinRequest {
            lobby_name: String::from("BotLobby"),
            team_name: TeamName::new("alpha"),
            player_name: PlayerName::new("Alex"),
        };
        let json = serde_json::to_value(&join).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "lobby_name": "BotLobby",
                "team_name": "alpha",
                "player_name": "Alex",
            })
        );
    }
}
