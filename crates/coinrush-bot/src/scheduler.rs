//! The decision actor: round-robin scheduling of per-agent decisions.
//!
//! Each scheduling round visits every controlled agent in fixed roster
//! order. A visit waits for the agent's slot to hold a fresh observation
//! (woken by the inbound actor, never sleep-polled), consumes it exactly
//! once, and emits at most one move command for it. The termination flag is
//! checked at the top of every round and of every per-agent wait, aborting
//! mid-round without finishing the remaining agents.
//!
//! Decision order per view: invalidate-then-resolve the objective fixation;
//! follow the first step of its path when one exists; otherwise fall back to
//! the momentum walk; a trapped agent is reported and skipped for the cycle.

use std::sync::Arc;
use std::time::Duration;

use coinrush_nav::{MomentumState, ObjectiveFixation};
use coinrush_types::{Direction, LocalView, PlayerName, TeamName};
use rand::Rng;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::BotConfig;
use crate::error::BotError;
use crate::nats::GameClient;
use crate::render;
use crate::state::{SharedState, ViewSlot};

/// One controlled agent: its identity, view mailbox, and the decision state
/// persisted across cycles. The scheduler is the only writer of the
/// fixation and momentum fields.
pub struct AgentRecord {
    /// The player this record controls.
    pub name: PlayerName,
    /// The team the player joined as.
    pub team: TeamName,
    /// Mailbox written by the inbound actor.
    slot: Arc<ViewSlot>,
    /// The objective committed to across cycles.
    fixation: ObjectiveFixation,
    /// Exploration facing and decaying straight-run bias.
    momentum: MomentumState,
    /// Set after a contract violation; a halted agent is skipped for the
    /// rest of the match.
    halted: bool,
}

impl AgentRecord {
    /// Create a fresh record around an agent's view slot.
    pub fn new(name: PlayerName, team: TeamName, slot: Arc<ViewSlot>) -> Self {
        Self {
            name,
            team,
            slot,
            fixation: ObjectiveFixation::new(),
            momentum: MomentumState::default(),
            halted: false,
        }
    }

    /// Decide one move for a fresh view.
    ///
    /// Returns `None` only when the agent is trapped (all four neighbors
    /// blocked), which is reported, not silently dropped.
    pub fn choose_move<R: Rng>(&mut self, view: &LocalView, rng: &mut R) -> Option<Direction> {
        let candidates = view.objective_candidates();

        if let Some((objective, path)) = self.fixation.resolve(view, &candidates) {
            // A successful resolution always carries at least one step.
            if let Some(&step) = path.first() {
                debug!(
                    player = %self.name,
                    objective = %objective,
                    remaining = path.len(),
                    "following path toward objective"
                );
                return Some(step);
            }
        }

        match self.momentum.next_direction(view, rng) {
            Some(direction) => {
                debug!(
                    player = %self.name,
                    direction = %direction,
                    momentum = self.momentum.momentum(),
                    "no reachable coin, exploring"
                );
                Some(direction)
            }
            None => {
                warn!(
                    player = %self.name,
                    position = %view.current_position,
                    "agent is trapped, no command this cycle"
                );
                None
            }
        }
    }
}

/// The decision actor. Owns the per-agent records and round-robins them
/// until the termination flag is raised.
pub struct Scheduler {
    agents: Vec<AgentRecord>,
    client: GameClient,
    state: Arc<SharedState>,
    lobby: String,
    move_interval: Duration,
    render_board: bool,
}

impl Scheduler {
    /// Build a scheduler from the configured roster, wiring each record to
    /// its slot in shared state.
    pub fn new(config: &BotConfig, client: GameClient, state: Arc<SharedState>) -> Self {
        let agents = config
            .players
            .iter()
            .filter_map(|spec| {
                state.slot(&spec.name).map(|slot| {
                    AgentRecord::new(spec.name.clone(), spec.team.clone(), slot)
                })
            })
            .collect();
        Self {
            agents,
            client,
            state,
            lobby: config.lobby.clone(),
            move_interval: config.move_interval,
            render_board: config.render_board,
        }
    }

    /// Run scheduling rounds until the game ends.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if a command cannot be published.
    pub async fn run(mut self) -> Result<(), BotError> {
        let mut game_over = self.state.game_over_watch();
        for agent in &self.agents {
            debug!(player = %agent.name, team = %agent.team, "agent registered");
        }
        info!(agents = self.agents.len(), "scheduler entering decision rounds");

        'rounds: loop {
            if *game_over.borrow() {
                break;
            }

            for agent in &mut self.agents {
                if *game_over.borrow() {
                    // Abort mid-round; remaining agents are not visited.
                    break 'rounds;
                }
                if agent.halted {
                    continue;
                }

                let Some(outcome) = wait_for_view(&agent.slot, &mut game_over).await else {
                    break 'rounds;
                };

                let view = match outcome {
                    Ok(view) => view,
                    Err(e) => {
                        error!(
                            player = %agent.name,
                            error = %e,
                            "halting agent after contract violation"
                        );
                        agent.halted = true;
                        continue;
                    }
                };

                if self.render_board {
                    println!("player game board [{}]", agent.name);
                    print!("{}", render::render_board(&view));
                }

                let mut rng = rand::rng();
                if let Some(direction) = agent.choose_move(&view, &mut rng) {
                    self.client
                        .emit_command(&self.lobby, &agent.name, direction)
                        .await?;
                }

                tokio::time::sleep(self.move_interval).await;
            }
        }

        info!("termination flag raised, scheduler stopping");
        Ok(())
    }
}

/// Wait until the slot yields a fresh observation or the game ends.
///
/// Returns `None` on termination. The wait is an outer loop around short
/// guarded accesses -- no lock is held while parked.
async fn wait_for_view(
    slot: &Arc<ViewSlot>,
    game_over: &mut watch::Receiver<bool>,
) -> Option<Result<LocalView, BotError>> {
    loop {
        if *game_over.borrow() {
            return None;
        }
        if let Some(outcome) = slot.take() {
            return Some(outcome);
        }
        tokio::select! {
            () = slot.notified() => {}
            _ = game_over.changed() => {}
        }
    }
}
