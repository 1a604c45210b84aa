//! Roulette table server.
//!
//! Runs one table engine with in-memory storage, optionally seats in-process
//! bots and exports Prometheus metrics, until Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error};
use bc_server::{
    config::{CliOverrides, ServerConfig},
    logging, metrics, observer,
};
use bot_casino::{
    bot::{BotConfig, BotManager},
    db::{InMemoryAccountStore, InMemoryRoundStore},
    engine::{Engine, SubscriberHub},
    wallet::WalletManager,
};
use log::info;
use pico_args::Arguments;
use tokio::sync::watch;

const HELP: &str = "\
Run a bot casino roulette table

USAGE:
  bc_server [OPTIONS]

OPTIONS:
  --bots       N           Number of in-process bots  [default: env BOT_COUNT or 0]
  --metrics    IP:PORT     Prometheus exporter bind   [default: env METRICS_BIND or disabled]
  --table      ID          Table identifier           [default: env TABLE_ID or main]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  TABLE_MAX_SEATS          Maximum seated participants
  TABLE_MIN_BET            Minimum bet in chips
  TABLE_BETTING_SECS       Betting window length
  STARTING_BALANCE         Chips for a new account
  RUST_LOG                 Log filter (e.g., info,bot_casino=debug)
  (See .env file for all configuration options)
";

fn parse_overrides() -> Result<CliOverrides, Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = CliOverrides {
        bot_count: pargs.opt_value_from_str("--bots")?,
        metrics_bind: pargs.opt_value_from_str::<_, SocketAddr>("--metrics")?,
        table_id: pargs.opt_value_from_str("--table")?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unknown arguments: {:?}", remaining);
    }

    Ok(overrides)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let overrides = parse_overrides()?;
    logging::init();

    let config = ServerConfig::from_env(overrides)?;
    config.validate()?;

    info!(
        "Starting table {} ({} seats, min bet {}, betting window {:?})",
        config.table.table_id,
        config.table.max_seats,
        config.table.min_bet,
        config.table.betting_duration
    );

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Metrics exporter listening on {}", addr);
    }

    let accounts = Arc::new(InMemoryAccountStore::new());
    let rounds = Arc::new(InMemoryRoundStore::new());
    let hub = Arc::new(SubscriberHub::default());
    let engine = Arc::new(Engine::new(
        config.table.clone(),
        accounts.clone(),
        rounds.clone(),
        hub.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let observer = tokio::spawn(observer::run(hub.subscribe(), shutdown_rx));

    let runner = engine.clone();
    let engine_task = tokio::spawn(async move { runner.run().await });

    let mut bots = BotManager::new(
        engine.clone(),
        WalletManager::new(accounts.clone(), config.wallet.clone()),
        hub.clone(),
    );
    if config.bot_count > 0 {
        let spawned = bots
            .spawn_bots(BotConfig::roster(config.bot_count, config.bot_bet_size))
            .await
            .context("Failed to spawn bots")?;
        info!("Seated {} bot(s)", spawned);
    }

    info!("Table is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    info!("Shutting down...");
    engine.stop();
    engine_task.await.context("Engine task failed")?;
    bots.shutdown().await;

    for (_, name, stats) in bots.stats().await {
        info!(
            "{}: {} rounds, {} wins, net {:+}, {:.1}% win rate",
            name,
            stats.rounds_played,
            stats.wins,
            stats.net_profit(),
            stats.win_rate()
        );
    }

    shutdown_tx.send_replace(true);
    let summary = observer.await.context("Observer task failed")?;
    info!(
        "Stopped after {} settled round(s), {} stored",
        summary.rounds,
        rounds.len().await
    );

    Ok(())
}
