//! Settlement stage: balances, round record and result broadcast.

use super::errors::SettlementError;
use super::events::TableEvent;
use super::table_engine::Engine;
use crate::game::{RoundResult, Spin, settle_bets};
use crate::table::Bet;
use crate::wallet::AccountDelta;

impl Engine {
    /// Settle a snapshot of the round's bets against `spin`
    ///
    /// Account updates are applied one bet at a time outside the table lock;
    /// a failed update is logged and skipped. If the round result cannot be
    /// saved, the table keeps its previous result and no result is broadcast.
    pub(super) async fn settle_round(
        &self,
        round_number: u64,
        spin: Spin,
        bets: &[Bet],
    ) -> Result<RoundResult, SettlementError> {
        let settled = settle_bets(bets, spin);

        for bet in &settled.bets {
            let delta = AccountDelta::for_settled_bet(bet);
            if let Err(e) = self
                .accounts
                .apply_delta(&bet.participant_id, &delta)
                .await
            {
                log::error!(
                    "Table {}: round {}: failed to update account {} for {} bet of {}: {}",
                    self.config.table_id,
                    round_number,
                    bet.participant_id,
                    bet.kind,
                    bet.amount,
                    e
                );
            }
        }

        log::info!(
            "Table {}: round {} settled on {}. Bets: {}, winners: {}, losers: {}, wagered: {}, paid: {}",
            self.config.table_id,
            round_number,
            spin,
            settled.bets.len(),
            settled.winners,
            settled.losers,
            settled.total_wagered,
            settled.total_payout
        );

        let result = RoundResult::new(self.config.table_id.clone(), round_number, settled);
        self.rounds
            .save(&result)
            .await
            .map_err(|source| SettlementError::Persist {
                round_number,
                source,
            })?;

        self.table.write().await.record_settlement(&result);

        let leaderboard = match self.leaderboard(None).await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "Table {}: leaderboard unavailable after round {}: {}",
                    self.config.table_id,
                    round_number,
                    e
                );
                Vec::new()
            }
        };

        self.broadcaster.notify(TableEvent::RoundSettled {
            result: result.clone(),
            leaderboard,
        });

        Ok(result)
    }
}
