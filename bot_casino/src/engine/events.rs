//! Table notifications and the observer hub that fans them out.

use super::leaderboard::LeaderboardEntry;
use crate::game::{RoundResult, Spin};
use crate::table::{Bet, Phase, Seat, TableId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

/// Default per-observer channel capacity
pub const DEFAULT_OBSERVER_CAPACITY: usize = 64;

/// Phase transition payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub table_id: TableId,
    pub phase: Phase,
    /// Seconds left in the new phase
    pub time_remaining: f64,
    pub round_number: u64,
    pub seats: Vec<Seat>,
    pub bets: Vec<Bet>,
    /// Set from the spinning phase onwards
    pub outcome: Option<Spin>,
}

/// Notification pushed to table observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    PhaseChange(PhaseChange),

    NewBet {
        table_id: TableId,
        bet: Bet,
    },

    #[serde(rename = "round_result")]
    RoundSettled {
        result: RoundResult,
        leaderboard: Vec<LeaderboardEntry>,
    },
}

impl TableEvent {
    /// Short event name for logs and metrics labels
    pub fn name(&self) -> &'static str {
        match self {
            TableEvent::PhaseChange(_) => "phase_change",
            TableEvent::NewBet { .. } => "new_bet",
            TableEvent::RoundSettled { .. } => "round_result",
        }
    }
}

/// Best-effort event sink
///
/// `notify` must not block and must not fail the caller.
pub trait Broadcaster: Send + Sync {
    fn notify(&self, event: TableEvent);
}

/// Broadcaster that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBroadcaster;

impl Broadcaster for NullBroadcaster {
    fn notify(&self, _event: TableEvent) {}
}

/// Observer ID type
pub type ObserverId = u64;

/// Receiving end handed to a new observer
#[derive(Debug)]
pub struct Subscription {
    pub id: ObserverId,
    pub receiver: mpsc::Receiver<TableEvent>,
}

/// Fan-out of table events to bounded per-observer channels
#[derive(Debug)]
pub struct SubscriberHub {
    subscribers: Mutex<HashMap<ObserverId, mpsc::Sender<TableEvent>>>,
    next_id: AtomicU64,
    capacity: usize,
}

impl Default for SubscriberHub {
    fn default() -> Self {
        Self::new(DEFAULT_OBSERVER_CAPACITY)
    }
}

impl SubscriberHub {
    /// Create a hub whose observers each buffer up to `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            capacity: capacity.max(1),
        }
    }

    /// Register a new observer
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::channel(self.capacity);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, sender);
        log::debug!("Observer {} subscribed", id);

        Subscription { id, receiver }
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    pub fn observer_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Broadcaster for SubscriberHub {
    fn notify(&self, event: TableEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        subscribers.retain(|id, sender| match sender.try_send(event.clone()) {
            Ok(_) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                log::warn!(
                    "Observer {} channel full, dropping {} notification",
                    id,
                    event.name()
                );
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                log::debug!("Observer {} disconnected, removing", id);
                false
            }
        });
    }
}
