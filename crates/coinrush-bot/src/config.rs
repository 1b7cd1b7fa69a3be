//! Configuration for the bot binary.
//!
//! All configuration is loaded from environment variables. The bot needs to
//! know how to reach the broker, which lobby to play in, and the roster of
//! controlled players with their team assignments.

use std::time::Duration;

use coinrush_types::{PlayerName, TeamName};

use crate::error::BotError;

/// Default roster used when `PLAYERS` is not set: two two-player teams.
const DEFAULT_PLAYERS: &str = "Alex:alpha,Jake:alpha,Ben:beta,Alice:beta";

/// One controlled player and the team it joins as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    /// The player's name.
    pub name: PlayerName,
    /// The team the player joins.
    pub team: TeamName,
}

/// Complete bot configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// NATS server URL (e.g. `nats://localhost:4222`).
    pub nats_url: String,
    /// The lobby to create or join.
    pub lobby: String,
    /// Controlled players in fixed scheduling order.
    pub players: Vec<PlayerSpec>,
    /// Pause applied after each emitted command, pacing the server.
    pub move_interval: Duration,
    /// Whether to print each agent's board window to stdout per decision.
    pub render_board: bool,
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `NATS_URL` -- broker connection string
    ///
    /// Optional variables:
    /// - `LOBBY_NAME` -- lobby to play in (default `BotLobby`)
    /// - `PLAYERS` -- roster as `name:team,name:team,...`
    ///   (default `Alex:alpha,Jake:alpha,Ben:beta,Alice:beta`)
    /// - `MOVE_INTERVAL_MS` -- pause after each command (default 500)
    /// - `RENDER_BOARD` -- print board windows to stdout (default `true`)
    pub fn from_env() -> Result<Self, BotError> {
        let nats_url = env_var("NATS_URL")?;

        let lobby = std::env::var("LOBBY_NAME").unwrap_or_else(|_| "BotLobby".to_owned());

        let roster = std::env::var("PLAYERS").unwrap_or_else(|_| DEFAULT_PLAYERS.to_owned());
        let players = parse_roster(&roster)?;

        let move_interval_ms: u64 = std::env::var("MOVE_INTERVAL_MS")
            .unwrap_or_else(|_| "500".to_owned())
            .parse()
            .map_err(|e| BotError::Config(format!("invalid MOVE_INTERVAL_MS: {e}")))?;

        let render_board: bool = std::env::var("RENDER_BOARD")
            .unwrap_or_else(|_| "true".to_owned())
            .parse()
            .map_err(|e| BotError::Config(format!("invalid RENDER_BOARD: {e}")))?;

        Ok(Self {
            nats_url,
            lobby,
            players,
            move_interval: Duration::from_millis(move_interval_ms),
            render_board,
        })
    }
}

/// Read a required environment variable.
fn env_var(name: &str) -> Result<String, BotError> {
    std::env::var(name)
        .map_err(|e| BotError::Config(format!("missing required env var {name}: {e}")))
}

/// Parse a roster string of the form `name:team,name:team,...`.
///
/// Player names must be unique; teams may repeat. Whitespace around entries
/// is tolerated.
fn parse_roster(roster: &str) -> Result<Vec<PlayerSpec>, BotError> {
    let mut players = Vec::new();

    for entry in roster.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (name, team) = entry.split_once(':').ok_or_else(|| {
            BotError::Config(format!("invalid roster entry (expected name:team): {entry}"))
        })?;
        let name = name.trim();
        let team = team.trim();
        if name.is_empty() || team.is_empty() {
            return Err(BotError::Config(format!(
                "invalid roster entry (empty name or team): {entry}"
            )));
        }
        let name = PlayerName::from(name);
        if players.iter().any(|p: &PlayerSpec| p.name == name) {
            return Err(BotError::Config(format!("duplicate player in roster: {name}")));
        }
        players.push(PlayerSpec {
            name,
            team: TeamName::from(team),
        });
    }

    if players.is_empty() {
        return Err(BotError::Config(String::from("roster is empty")));
    }

    Ok(players)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_parses_to_two_teams_of_two() {
        let players = parse_roster(DEFAULT_PLAYERS).unwrap();
        assert_eq!(players.len(), 4);
        assert_eq!(players.first().unwrap().name, PlayerName::from("Alex"));
        assert_eq!(players.first().unwrap().team, TeamName::from("alpha"));
        assert_eq!(players.last().unwrap().team, TeamName::from("beta"));
    }

    #[test]
    fn roster_tolerates_whitespace() {
        let players = parse_roster(" Solo : gamma ").unwrap();
        assert_eq!(
            players,
            vec![PlayerSpec {
                name: PlayerName::from("Solo"),
                team: TeamName::from("gamma"),
            }]
        );
    }

    #[test]
    fn roster_preserves_scheduling_order() {
        let players = parse_roster("B:t,A:t,C:t").unwrap();
        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn malformed_roster_entries_are_rejected() {
        assert!(parse_roster("no-colon").is_err());
        assert!(parse_roster("name:").is_err());
        assert!(parse_roster(":team").is_err());
        assert!(parse_roster("").is_err());
    }

    #[test]
    fn duplicate_players_are_rejected() {
        assert!(parse_roster("A:t1,A:t2").is_err());
    }
}
