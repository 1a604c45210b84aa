//! Observer task feeding table events into logs and metrics.

use crate::{logging, metrics};
use bot_casino::engine::{Subscription, TableEvent};
use tokio::sync::watch;

/// Counts of events seen by the observer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObserverSummary {
    pub phase_changes: u64,
    pub bets: u64,
    pub rounds: u64,
}

impl ObserverSummary {
    fn record(&mut self, event: &TableEvent) {
        match event {
            TableEvent::PhaseChange(_) => self.phase_changes += 1,
            TableEvent::NewBet { .. } => self.bets += 1,
            TableEvent::RoundSettled { .. } => self.rounds += 1,
        }
    }
}

/// Consume events until shutdown or until the hub drops the subscription
pub async fn run(
    mut subscription: Subscription,
    mut shutdown: watch::Receiver<bool>,
) -> ObserverSummary {
    let mut summary = ObserverSummary::default();

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            event = subscription.receiver.recv() => {
                let Some(event) = event else { break };
                summary.record(&event);
                metrics::record_event(&event);

                match &event {
                    TableEvent::RoundSettled { result, leaderboard } => {
                        logging::log_round_settled(result);
                        if let Some(leader) = leaderboard.first() {
                            tracing::debug!(
                                leader = %leader.name,
                                balance = leader.balance,
                                "Leaderboard updated"
                            );
                        }
                    }
                    TableEvent::PhaseChange(change) => {
                        tracing::debug!(
                            phase = %change.phase,
                            round_number = change.round_number,
                            seated = change.seats.len(),
                            "Phase change"
                        );
                    }
                    TableEvent::NewBet { .. } => {}
                }
            }
        }
    }

    tracing::info!(
        phase_changes = summary.phase_changes,
        bets = summary.bets,
        rounds = summary.rounds,
        "Observer stopped"
    );
    summary
}
