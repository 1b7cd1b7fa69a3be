//! Game bot entry point for the coinrush grid game.
//!
//! The bot joins a roster of players into one lobby, receives each player's
//! egocentric board view over NATS, and decides one move per fresh view per
//! player until the server announces the end of the match.
//!
//! # Architecture
//!
//! ```text
//! NATS (game_state) --> per-agent view slot --> scheduler --> NATS (move)
//!          |                                        |
//!          +-- lobby notices --> termination flag --+
//! ```
//!
//! Two actors run concurrently: the inbound tasks drain the subscriptions
//! into shared per-agent state, and the scheduler round-robins the agents,
//! each consuming its freshest view exactly once per decision.

mod config;
mod error;
mod inbound;
mod nats;
mod render;
mod scheduler;
mod state;

use std::sync::Arc;
use std::time::Duration;

use coinrush_types::JoinRequest;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::BotConfig;
use crate::nats::GameClient;
use crate::scheduler::Scheduler;
use crate::state::SharedState;

/// Pause between the join requests and the start signal, giving the server
/// time to register the roster.
const LOBBY_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// connects to NATS, joins and starts the lobby, then runs the decision
/// loop until the game-over notice arrives.
///
/// # Errors
///
/// Returns an error if initialization or the decision loop fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("coinrush-bot starting");

    // Load configuration from environment
    let config = BotConfig::from_env()?;
    info!(
        nats_url = config.nats_url,
        lobby = config.lobby,
        players = config.players.len(),
        move_interval_ms = config.move_interval.as_millis(),
        render_board = config.render_board,
        "configuration loaded"
    );

    // Connect to NATS
    let client = GameClient::connect(&config.nats_url).await?;

    // Shared per-agent state and inbound subscriptions. Subscriptions are
    // established before joining so the first observations cannot race past
    // them.
    let state = Arc::new(SharedState::new(
        config.players.iter().map(|spec| spec.name.clone()),
    ));
    inbound::start(&client, Arc::clone(&state), &config.lobby).await?;

    // Join every controlled player into the lobby.
    for spec in &config.players {
        let join = JoinRequest {
            lobby_name: config.lobby.clone(),
            team_name: spec.team.clone(),
            player_name: spec.name.clone(),
        };
        client.publish_join(&join).await?;
        info!(player = %spec.name, team = %spec.team, "player joined");
    }
    client.flush().await?;

    // Let the server settle the roster, then start the match.
    tokio::time::sleep(LOBBY_SETTLE_DELAY).await;
    client.publish_start(&config.lobby).await?;

    // Run the decision loop until the game-over notice.
    let sched = Scheduler::new(&config, client, Arc::clone(&state));
    sched.run().await?;

    // Final standings.
    let scores = state.latest_scores();
    info!("game finished");
    let standings: Vec<String> = scores
        .iter()
        .map(|(team, points)| format!("{team}:{points}"))
        .collect();
    println!("final scores: {}", standings.join("  "));

    info!("coinrush-bot shutdown complete");
    Ok(())
}
