//! Structured logging configuration.
//!
//! The engine library logs through the `log` facade; those records are
//! bridged into `tracing` here so everything goes through one subscriber.

use bot_casino::RoundResult;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels are read from the RUST_LOG env var, defaulting to `info`.
///
/// # Example
///
/// ```no_run
/// use bc_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a settled round with structured fields
///
/// # Example
///
/// ```
/// use bc_server::logging::log_round_settled;
/// use bot_casino::game::{RoundResult, Spin, settle_bets};
///
/// let settled = settle_bets(&[], Spin::new(0).unwrap());
/// log_round_settled(&RoundResult::new("main".to_string(), 1, settled));
/// ```
pub fn log_round_settled(result: &RoundResult) {
    let winners = result.bets.iter().filter(|bet| bet.is_winner).count();
    tracing::info!(
        table_id = %result.table_id,
        round_number = result.round_number,
        outcome = result.outcome,
        color = %result.color,
        bets = result.bets.len(),
        winners = winners,
        total_wagered = result.total_wagered,
        total_payout = result.total_payout,
        "Round settled"
    );

    let house_loss = result.total_payout - result.total_wagered;
    if house_loss > 0 {
        tracing::debug!(
            table_id = %result.table_id,
            round_number = result.round_number,
            house_loss = house_loss,
            "Players came out ahead this round"
        );
    }
}
