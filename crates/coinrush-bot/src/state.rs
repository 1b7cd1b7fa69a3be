//! Shared per-agent state between the inbound actor and the scheduler.
//!
//! Each controlled agent owns a [`ViewSlot`]: a single-place mailbox holding
//! the most recent observation. The inbound actor is the only writer of the
//! slot contents; the scheduler is the only consumer. Freshness is the
//! presence of a value -- taking it clears the flag, so a view can be
//! consumed at most once and a decision can never run twice on the same
//! observation.
//!
//! The slot realizes the agent's readiness gate:
//!
//! ```text
//! AWAITING_VIEW --publish--> VIEW_READY --take--> DECIDING --command--> AWAITING_VIEW
//! ```
//!
//! Locks are held only for the swap itself, never across an await; waiting
//! happens on the slot's [`Notify`], woken exactly when a new view lands.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use coinrush_types::{LocalView, PlayerName, ScoreBoard};
use tokio::sync::{Notify, watch};
use tracing::debug;

use crate::error::BotError;

/// Single-place mailbox for one agent's most recent observation.
///
/// A newer observation replaces an unconsumed older one wholesale; views
/// are never merged. A malformed observation poisons the slot with the
/// contract error instead of a view, so the scheduler can halt that agent.
#[derive(Debug, Default)]
pub struct ViewSlot {
    latest: Mutex<Option<Result<LocalView, BotError>>>,
    notify: Notify,
}

impl ViewSlot {
    /// Create an empty slot (state `AWAITING_VIEW`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh observation, replacing any unconsumed one, and wake
    /// the waiting decision loop.
    pub fn publish(&self, view: LocalView) {
        self.store(Ok(view));
    }

    /// Poison the slot with a contract violation; the decision loop will
    /// surface it and halt the agent.
    pub fn poison(&self, error: BotError) {
        self.store(Err(error));
    }

    fn store(&self, value: Result<LocalView, BotError>) {
        let Ok(mut guard) = self.latest.lock() else {
            return; // poisoned mutex -- a panicking writer already aborted
        };
        if guard.is_some() {
            debug!("superseding an unconsumed view");
        }
        *guard = Some(value);
        drop(guard);
        self.notify.notify_one();
    }

    /// Take the fresh observation out of the slot, if any, clearing the
    /// freshness flag. Each published view is returned at most once.
    pub fn take(&self) -> Option<Result<LocalView, BotError>> {
        let Ok(mut guard) = self.latest.lock() else {
            return None;
        };
        guard.take()
    }

    /// Wait until a new value lands in the slot.
    ///
    /// Callers must re-check [`take`] after waking; the notification only
    /// signals that the slot changed.
    ///
    /// [`take`]: Self::take
    pub async fn notified(&self) {
        self.notify.notified().await;
    }
}

/// All state shared between the inbound actor and the scheduler.
///
/// Single-writer discipline per field: the inbound actor writes slots,
/// scores, and the termination flag; the scheduler only reads (and takes
/// from slots).
#[derive(Debug)]
pub struct SharedState {
    slots: BTreeMap<PlayerName, Arc<ViewSlot>>,
    scores: Mutex<ScoreBoard>,
    game_over: watch::Sender<bool>,
}

impl SharedState {
    /// Create shared state with one empty slot per controlled player.
    pub fn new(players: impl IntoIterator<Item = PlayerName>) -> Self {
        let slots = players
            .into_iter()
            .map(|name| (name, Arc::new(ViewSlot::new())))
            .collect();
        let (game_over, _) = watch::channel(false);
        Self {
            slots,
            scores: Mutex::new(ScoreBoard::new()),
            game_over,
        }
    }

    /// The view slot for a controlled player, or `None` for a player the
    /// bot does not control (other lobby members share the wildcard
    /// subscription).
    pub fn slot(&self, player: &PlayerName) -> Option<Arc<ViewSlot>> {
        self.slots.get(player).cloned()
    }

    /// Replace the retained standings with the latest payload.
    pub fn update_scores(&self, scores: ScoreBoard) {
        if let Ok(mut guard) = self.scores.lock() {
            *guard = scores;
        }
    }

    /// The most recently received standings.
    pub fn latest_scores(&self) -> ScoreBoard {
        self.scores
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Raise the global termination flag, waking every waiter.
    pub fn set_game_over(&self) {
        let _ = self.game_over.send(true);
    }

    /// Whether the termination flag has been raised.
    pub fn is_game_over(&self) -> bool {
        *self.game_over.borrow()
    }

    /// Subscribe to the termination flag for select-based waiting.
    pub fn game_over_watch(&self) -> watch::Receiver<bool> {
        self.game_over.subscribe()
    }
}
