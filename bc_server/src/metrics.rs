//! Prometheus metrics for monitoring the roulette table.
//!
//! Metrics are exposed in Prometheus text format for scraping by monitoring
//! systems. They are fed from table events by the observer task.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use bc_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::table_seated(3);
//! ```

use bot_casino::RoundResult;
use bot_casino::engine::TableEvent;
use bot_casino::table::Phase;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Sets up a Prometheus scrape endpoint on the specified address.
///
/// # Arguments
///
/// - `addr`: Address to bind the metrics server to (e.g., `0.0.0.0:9090`)
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

/// Increment the settled rounds counter.
pub fn rounds_settled_total() {
    metrics::counter!("rounds_settled_total").increment(1);
}

/// Increment the accepted bets counter for a bet kind.
pub fn bets_placed_total(kind: &str) {
    metrics::counter!("bets_placed_total", "kind" => kind.to_string()).increment(1);
}

/// Set the number of seated participants.
pub fn table_seated(count: usize) {
    metrics::gauge!("table_seated").set(count as f64);
}

/// Set the current round number.
pub fn table_round_number(round_number: u64) {
    metrics::gauge!("table_round_number").set(round_number as f64);
}

/// Record chip totals of a settled round.
pub fn round_totals(result: &RoundResult) {
    metrics::histogram!("round_wagered_chips").record(result.total_wagered as f64);
    metrics::histogram!("round_payout_chips").record(result.total_payout as f64);
}

/// Update metrics from one table event.
pub fn record_event(event: &TableEvent) {
    match event {
        TableEvent::PhaseChange(change) => {
            table_seated(change.seats.len());
            if change.phase == Phase::Betting {
                table_round_number(change.round_number);
            }
        }
        TableEvent::NewBet { bet, .. } => bets_placed_total(bet.kind.as_str()),
        TableEvent::RoundSettled { result, .. } => {
            rounds_settled_total();
            round_totals(result);
        }
    }
}
