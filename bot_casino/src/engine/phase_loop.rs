//! Phase loop driving a table through its rounds.
//!
//! IDLE -> BETTING -> SPINNING -> SETTLEMENT -> PAUSE -> (BETTING | IDLE)
//!
//! Each stage mutates the table under the write lock, releases it, notifies
//! observers and then waits at a named suspension point. A suspension ends
//! early when [`Engine::stop`] is called.

use super::events::{PhaseChange, TableEvent};
use super::table_engine::Engine;
use crate::game::Spin;
use crate::table::{Phase, Table, TableConfig};
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::sync::watch;

/// Next stage of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Betting,
    Spinning,
    Settlement(Spin),
    Pause(Spin),
}

/// Points where the loop waits without holding the table lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suspension {
    IdlePoll,
    BettingWindow,
    SpinDelay,
    SettlementDelay,
    PauseDelay,
}

impl Suspension {
    fn duration(self, config: &TableConfig) -> Duration {
        match self {
            Suspension::IdlePoll => config.idle_poll,
            Suspension::BettingWindow => config.betting_duration,
            Suspension::SpinDelay => config.spin_duration,
            Suspension::SettlementDelay => config.settlement_duration,
            Suspension::PauseDelay => config.pause_duration,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Suspension::IdlePoll => "idle poll",
            Suspension::BettingWindow => "betting window",
            Suspension::SpinDelay => "spin delay",
            Suspension::SettlementDelay => "settlement delay",
            Suspension::PauseDelay => "pause delay",
        }
    }
}

impl Engine {
    /// Run the phase loop until [`stop`](Engine::stop) is called
    pub async fn run(&self) {
        log::info!("Table {} phase loop starting", self.config.table_id);

        let mut stop = self.stop_tx.subscribe();
        let mut stage = Stage::Idle;

        loop {
            if *stop.borrow() {
                break;
            }

            let next = match stage {
                Stage::Idle => self.idle(&mut stop).await,
                Stage::Betting => self.betting(&mut stop).await,
                Stage::Spinning => self.spinning(&mut stop).await,
                Stage::Settlement(spin) => self.settlement(&mut stop, spin).await,
                Stage::Pause(spin) => self.pause(&mut stop, spin).await,
            };

            match next {
                ControlFlow::Continue(next) => stage = next,
                ControlFlow::Break(()) => break,
            }
        }

        log::info!("Table {} phase loop stopped", self.config.table_id);
    }

    async fn idle(&self, stop: &mut watch::Receiver<bool>) -> ControlFlow<(), Stage> {
        if self.table.read().await.seat_count() > 0 {
            return ControlFlow::Continue(Stage::Betting);
        }
        self.suspend(stop, Suspension::IdlePoll).await?;
        ControlFlow::Continue(Stage::Idle)
    }

    async fn betting(&self, stop: &mut watch::Receiver<bool>) -> ControlFlow<(), Stage> {
        let event = {
            let mut table = self.table.write().await;
            let round_number = table.open_round();
            log::info!(
                "Table {}: round {} open for bets ({} seated)",
                self.config.table_id,
                round_number,
                table.seat_count()
            );
            phase_change(&table, None)
        };
        self.broadcaster.notify(event);

        self.suspend(stop, Suspension::BettingWindow).await?;
        ControlFlow::Continue(Stage::Spinning)
    }

    async fn spinning(&self, stop: &mut watch::Receiver<bool>) -> ControlFlow<(), Stage> {
        let spin = self.wheel.spin();
        let event = {
            let mut table = self.table.write().await;
            table.enter_phase(Phase::Spinning);
            log::info!(
                "Table {}: round {} spinning, {} bets, outcome {}",
                self.config.table_id,
                table.round_number(),
                table.bets().len(),
                spin
            );
            phase_change(&table, Some(spin))
        };
        self.broadcaster.notify(event);

        self.suspend(stop, Suspension::SpinDelay).await?;
        ControlFlow::Continue(Stage::Settlement(spin))
    }

    async fn settlement(
        &self,
        stop: &mut watch::Receiver<bool>,
        spin: Spin,
    ) -> ControlFlow<(), Stage> {
        let (event, round_number, bets) = {
            let mut table = self.table.write().await;
            table.enter_phase(Phase::Settlement);
            (
                phase_change(&table, Some(spin)),
                table.round_number(),
                table.bets().to_vec(),
            )
        };
        self.broadcaster.notify(event);

        // Runs to completion even if a stop arrives meanwhile
        if let Err(e) = self.settle_round(round_number, spin, &bets).await {
            log::error!("Table {}: {}", self.config.table_id, e);
        }

        self.suspend(stop, Suspension::SettlementDelay).await?;
        ControlFlow::Continue(Stage::Pause(spin))
    }

    async fn pause(&self, stop: &mut watch::Receiver<bool>, spin: Spin) -> ControlFlow<(), Stage> {
        let event = {
            let mut table = self.table.write().await;
            table.enter_phase(Phase::Pause);
            phase_change(&table, Some(spin))
        };
        self.broadcaster.notify(event);

        self.suspend(stop, Suspension::PauseDelay).await?;

        let event = {
            let mut table = self.table.write().await;
            if table.seat_count() > 0 {
                return ControlFlow::Continue(Stage::Betting);
            }
            table.enter_phase(Phase::Idle);
            log::info!("Table {}: no one seated, going idle", self.config.table_id);
            phase_change(&table, None)
        };
        self.broadcaster.notify(event);

        ControlFlow::Continue(Stage::Idle)
    }

    async fn suspend(
        &self,
        stop: &mut watch::Receiver<bool>,
        point: Suspension,
    ) -> ControlFlow<()> {
        if *stop.borrow() {
            return ControlFlow::Break(());
        }

        let duration = point.duration(&self.config);
        tokio::select! {
            _ = tokio::time::sleep(duration) => ControlFlow::Continue(()),
            _ = stop.changed() => {
                log::debug!(
                    "Table {}: stop during {}",
                    self.config.table_id,
                    point.name()
                );
                ControlFlow::Break(())
            }
        }
    }
}

fn phase_change(table: &Table, outcome: Option<Spin>) -> TableEvent {
    let status = table.status();
    TableEvent::PhaseChange(PhaseChange {
        table_id: status.table_id,
        phase: status.phase,
        time_remaining: status.time_remaining,
        round_number: status.round_number,
        seats: status.seats,
        bets: status.bets,
        outcome,
    })
}
