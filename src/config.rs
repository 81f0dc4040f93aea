//! Configuration management
//!
//! Every setting has a compiled-in default. CLI flags and environment
//! variables (optionally loaded from a `.env` file) override them; there
//! is no config file.

use alloy::primitives::Address;
use anyhow::{bail, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::time::Duration;
use tracing::warn;

use crate::filters::{AddressList, DEFAULT_ROUTER, DEFAULT_TRACKED};
use crate::notify::webhook::DEFAULT_WEBHOOK_URL;
use crate::types::{FetchErrorPolicy, FilterPolicy, ReconnectPolicy};

/// Mainnet WebSocket endpoint. The project id is a placeholder; set WS_URL.
pub const DEFAULT_WS_URL: &str = "wss://mainnet.infura.io/ws/v3/REPLACE_WITH_PROJECT_ID";

/// Filter selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterMode {
    /// Tracked wallet calling a known router
    #[value(name = "router-and-sender")]
    RouterAndSender,
    /// Tracked wallet moving at least --min-whole-units
    #[value(name = "sender-min-value")]
    SenderMinValue,
}

/// Alert a chat robot when tracked wallets transact
#[derive(Debug, Clone, Parser)]
#[command(name = "wallet-watch")]
pub struct CliArgs {
    /// Node WebSocket endpoint
    #[arg(long, env = "WS_URL", default_value = DEFAULT_WS_URL)]
    pub ws_url: String,

    /// Robot webhook URL (including access token)
    #[arg(long, env = "WEBHOOK_URL", default_value = DEFAULT_WEBHOOK_URL)]
    pub webhook_url: String,

    /// Comma-separated router addresses (checksummed)
    #[arg(long, env = "ROUTER_ADDRESSES", default_value = DEFAULT_ROUTER)]
    pub routers: String,

    /// Comma-separated tracked wallet addresses (checksummed)
    #[arg(long, env = "TRACKED_ADDRESSES", default_value = DEFAULT_TRACKED)]
    pub tracked: String,

    #[arg(long, env = "FILTER_POLICY", value_enum, default_value_t = FilterMode::RouterAndSender)]
    pub filter: FilterMode,

    /// Minimum whole native units for sender-min-value
    #[arg(long, env = "MIN_WHOLE_UNITS", default_value_t = 1)]
    pub min_whole_units: u64,

    /// Block fetch failure handling (default depends on --filter)
    #[arg(long, env = "FETCH_ERROR_POLICY", value_enum)]
    pub fetch_errors: Option<FetchErrorPolicy>,

    /// Consecutive resubscribe attempts before exiting (0 = exit immediately)
    #[arg(long, env = "MAX_RECONNECTS", default_value_t = 10)]
    pub max_reconnects: u32,

    #[arg(long, env = "RECONNECT_BASE_MS", default_value_t = 500)]
    pub reconnect_base_ms: u64,

    #[arg(long, env = "RECONNECT_MAX_MS", default_value_t = 30_000)]
    pub reconnect_max_ms: u64,

    /// Mention everyone in the chat group
    #[arg(long, env = "MENTION_ALL", default_value_t = true, action = ArgAction::Set)]
    pub mention_all: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl CliArgs {
    /// Load `.env` (if any) into the environment, then parse the CLI.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::parse()
    }
}

/// Immutable settings handed to the block watcher
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub ws_url: String,
    pub webhook_url: String,
    pub routers: AddressList,
    pub tracked: AddressList,
    pub filter: FilterPolicy,
    pub fetch_errors: FetchErrorPolicy,
    pub reconnect: ReconnectPolicy,
    pub mention_all: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        let filter = FilterPolicy::ByRecipientAndSender;
        Self {
            ws_url: DEFAULT_WS_URL.to_string(),
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            routers: AddressList::new([DEFAULT_ROUTER]),
            tracked: AddressList::new([DEFAULT_TRACKED]),
            filter,
            fetch_errors: filter.default_fetch_errors(),
            reconnect: ReconnectPolicy::default(),
            mention_all: true,
        }
    }
}

impl WatchConfig {
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let filter = match args.filter {
            FilterMode::RouterAndSender => FilterPolicy::ByRecipientAndSender,
            FilterMode::SenderMinValue => FilterPolicy::BySenderAndMinValue {
                min_whole_units: args.min_whole_units,
            },
        };

        let routers = AddressList::parse(&args.routers);
        let tracked = AddressList::parse(&args.tracked);

        if tracked.is_empty() {
            bail!("No tracked addresses configured");
        }
        if filter == FilterPolicy::ByRecipientAndSender && routers.is_empty() {
            bail!("Filter {} needs at least one router address", filter);
        }
        if args.ws_url.trim().is_empty() {
            bail!("WS_URL is empty");
        }
        if args.webhook_url.trim().is_empty() {
            bail!("WEBHOOK_URL is empty");
        }
        if args.reconnect_base_ms > args.reconnect_max_ms {
            bail!(
                "RECONNECT_BASE_MS ({}) exceeds RECONNECT_MAX_MS ({})",
                args.reconnect_base_ms,
                args.reconnect_max_ms
            );
        }

        warn_unmatchable(&routers, "router");
        warn_unmatchable(&tracked, "tracked");

        Ok(Self {
            ws_url: args.ws_url.clone(),
            webhook_url: args.webhook_url.clone(),
            routers,
            tracked,
            filter,
            fetch_errors: args
                .fetch_errors
                .unwrap_or_else(|| filter.default_fetch_errors()),
            reconnect: ReconnectPolicy {
                max_attempts: args.max_reconnects,
                base_delay: Duration::from_millis(args.reconnect_base_ms),
                max_delay: Duration::from_millis(args.reconnect_max_ms),
            },
            mention_all: args.mention_all,
        })
    }
}

/// Entries that are not EIP-55 checksummed addresses can never match,
/// since transactions are compared in checksummed form.
fn warn_unmatchable(list: &AddressList, label: &str) {
    for entry in list.iter() {
        if Address::parse_checksummed(entry, None).is_err() {
            warn!(
                "{} address '{}' is not a checksummed address, it will never match",
                label, entry
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["wallet-watch"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_match_compiled_in_config() {
        let config = WatchConfig::from_args(&parse(&[])).unwrap();
        let defaults = WatchConfig::default();

        assert_eq!(config.routers, defaults.routers);
        assert_eq!(config.tracked, defaults.tracked);
        assert_eq!(config.filter, FilterPolicy::ByRecipientAndSender);
        assert_eq!(config.fetch_errors, FetchErrorPolicy::Fatal);
        assert_eq!(config.reconnect, ReconnectPolicy::default());
        assert!(config.mention_all);
        assert!(config.tracked.contains(DEFAULT_TRACKED));
    }

    #[test]
    fn test_sender_min_value_defaults_to_skip() {
        let config = WatchConfig::from_args(&parse(&[
            "--filter",
            "sender-min-value",
            "--min-whole-units",
            "3",
        ]))
        .unwrap();

        assert_eq!(config.filter, FilterPolicy::BySenderAndMinValue { min_whole_units: 3 });
        assert_eq!(config.fetch_errors, FetchErrorPolicy::SkipAndLog);
    }

    #[test]
    fn test_fetch_policy_override() {
        let config = WatchConfig::from_args(&parse(&["--fetch-errors", "skip"])).unwrap();
        assert_eq!(config.filter, FilterPolicy::ByRecipientAndSender);
        assert_eq!(config.fetch_errors, FetchErrorPolicy::SkipAndLog);
    }

    #[test]
    fn test_address_lists_from_cli() {
        let config = WatchConfig::from_args(&parse(&[
            "--tracked",
            "0xAf2358e98683265cBd3a48509123d390dDf54534, 0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D",
            "--mention-all",
            "false",
        ]))
        .unwrap();

        assert_eq!(config.tracked.len(), 2);
        assert!(!config.mention_all);
    }

    #[test]
    fn test_empty_tracked_is_rejected() {
        assert!(WatchConfig::from_args(&parse(&["--tracked", " , "])).is_err());
    }

    #[test]
    fn test_router_policy_needs_routers() {
        assert!(WatchConfig::from_args(&parse(&["--routers", ""])).is_err());
        // ...but the value policy does not look at routers
        assert!(WatchConfig::from_args(&parse(&[
            "--routers",
            "",
            "--filter",
            "sender-min-value"
        ]))
        .is_ok());
    }

    #[test]
    fn test_reconnect_bounds_validated() {
        assert!(WatchConfig::from_args(&parse(&[
            "--reconnect-base-ms",
            "5000",
            "--reconnect-max-ms",
            "100"
        ]))
        .is_err());

        let config = WatchConfig::from_args(&parse(&["--max-reconnects", "0"])).unwrap();
        assert_eq!(config.reconnect.max_attempts, 0);
    }
}
