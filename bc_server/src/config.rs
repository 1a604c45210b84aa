//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use bot_casino::table::TableConfig;
use bot_casino::wallet::WalletConfig;
use std::net::SocketAddr;
use std::time::Duration;

/// Largest bot roster the server will spawn
const MAX_BOTS: usize = 100;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Table settings
    pub table: TableConfig,
    /// Account policy
    pub wallet: WalletConfig,
    /// Number of in-process bots to seat on startup
    pub bot_count: usize,
    /// Base stake for bots
    pub bot_bet_size: i64,
    /// Prometheus exporter address; disabled when unset
    pub metrics_bind: Option<SocketAddr>,
}

/// Command-line overrides
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bot_count: Option<usize>,
    pub metrics_bind: Option<SocketAddr>,
    pub table_id: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values given on the command line, which win over the environment
    ///
    /// # Errors
    ///
    /// Returns error if a set variable cannot be parsed
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let defaults = TableConfig::default();

        let table = TableConfig {
            table_id: overrides
                .table_id
                .or_else(|| std::env::var("TABLE_ID").ok())
                .unwrap_or(defaults.table_id),
            max_seats: parse_env_or("TABLE_MAX_SEATS", defaults.max_seats)?,
            min_bet: parse_env_or("TABLE_MIN_BET", defaults.min_bet)?,
            bet_rate_limit: Duration::from_millis(parse_env_or(
                "BET_RATE_LIMIT_MS",
                duration_millis(defaults.bet_rate_limit),
            )?),
            betting_duration: Duration::from_secs(parse_env_or(
                "TABLE_BETTING_SECS",
                defaults.betting_duration.as_secs(),
            )?),
            spin_duration: Duration::from_secs(parse_env_or(
                "TABLE_SPIN_SECS",
                defaults.spin_duration.as_secs(),
            )?),
            settlement_duration: Duration::from_secs(parse_env_or(
                "TABLE_SETTLEMENT_SECS",
                defaults.settlement_duration.as_secs(),
            )?),
            pause_duration: Duration::from_secs(parse_env_or(
                "TABLE_PAUSE_SECS",
                defaults.pause_duration.as_secs(),
            )?),
            idle_poll: defaults.idle_poll,
            leaderboard_size: parse_env_or("LEADERBOARD_SIZE", defaults.leaderboard_size)?,
        };

        let wallet_defaults = WalletConfig::default();
        let wallet = WalletConfig {
            starting_balance: parse_env_or("STARTING_BALANCE", wallet_defaults.starting_balance)?,
            refill_amount: parse_env_or("REFILL_AMOUNT", wallet_defaults.refill_amount)?,
            refill_cooldown_hours: parse_env_or(
                "REFILL_COOLDOWN_HOURS",
                wallet_defaults.refill_cooldown_hours,
            )?,
        };

        let bot_count = match overrides.bot_count {
            Some(count) => count,
            None => parse_env_or("BOT_COUNT", 0)?,
        };

        let metrics_bind = match overrides.metrics_bind {
            Some(addr) => Some(addr),
            None => parse_env_opt("METRICS_BIND")?,
        };

        Ok(ServerConfig {
            table,
            wallet,
            bot_count,
            bot_bet_size: parse_env_or("BOT_BET_SIZE", 10)?,
            metrics_bind,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.table.validate().map_err(|reason| ConfigError::Invalid {
            var: "TABLE_*".to_string(),
            reason,
        })?;

        self.wallet.validate().map_err(|reason| ConfigError::Invalid {
            var: "STARTING_BALANCE/REFILL_*".to_string(),
            reason,
        })?;

        if self.bot_count > MAX_BOTS {
            return Err(ConfigError::Invalid {
                var: "BOT_COUNT".to_string(),
                reason: format!("Must be at most {MAX_BOTS}"),
            });
        }

        if self.bot_count > self.table.max_seats {
            return Err(ConfigError::Invalid {
                var: "BOT_COUNT".to_string(),
                reason: format!("Cannot exceed max seats ({})", self.table.max_seats),
            });
        }

        if self.bot_bet_size < self.table.min_bet {
            return Err(ConfigError::Invalid {
                var: "BOT_BET_SIZE".to_string(),
                reason: format!("Must be at least the minimum bet ({})", self.table.min_bet),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_env_opt(key)?.unwrap_or(default))
}

/// Parse an optional environment variable
fn parse_env_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
