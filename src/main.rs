//! Wallet Watch
//!
//! Main entry point. Connects to the node over WebSocket, follows new
//! heads, and posts a chat-robot alert for every transaction from a
//! tracked wallet that passes the configured filter.
//!
//! Architecture:
//! - Block watcher runs as a background tokio task
//! - Main task blocks on OS signals (QUIT/TERM/INT exit, HUP ignored)
//! - Exits non-zero if the watcher hits a fatal error first
//!
//! Created: 2026-10-19

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use wallet_watch::chain::{AlloyBlockSource, LondonRecovery};
use wallet_watch::config::{CliArgs, WatchConfig};
use wallet_watch::notify::WebhookNotifier;
use wallet_watch::shutdown::{register_signals, signal_name, wait_for_shutdown};
use wallet_watch::watcher::BlockWatcher;

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::load();
    init_logging(args.log_json);

    info!("Wallet watch starting...");

    let config = WatchConfig::from_args(&args)?;
    let notifier = WebhookNotifier::new(config.webhook_url.clone());
    info!(
        "Node: {}... | webhook: {} | mention_all={}",
        config.ws_url.chars().take(40).collect::<String>(),
        notifier.redacted_url(),
        config.mention_all
    );
    info!(
        "Filter: {} | fetch errors: {:?} | reconnects: {} (base {:?}, max {:?})",
        config.filter,
        config.fetch_errors,
        config.reconnect.max_attempts,
        config.reconnect.base_delay,
        config.reconnect.max_delay
    );

    let source = AlloyBlockSource::connect(&config.ws_url)
        .await
        .context("Failed to connect to node")?;
    let current = source
        .latest_block_number()
        .await
        .context("Failed to query block number")?;
    info!("Connected! Current block: {}", current);

    let signals = register_signals().context("Failed to register signal handlers")?;
    let signals_handle = signals.handle();

    let watcher = BlockWatcher::new(source, LondonRecovery, notifier, config);
    let mut watcher_task = tokio::spawn(async move { watcher.run().await });

    info!("Server started");

    let outcome = tokio::select! {
        signal = wait_for_shutdown(signals) => {
            match signal {
                Some(sig) => info!("Got {}, exiting now...", signal_name(sig)),
                None => warn!("Signal stream closed, exiting"),
            }
            Ok(())
        }
        joined = &mut watcher_task => {
            match joined {
                Ok(Ok(())) => {
                    info!("Watcher stopped");
                    Ok(())
                }
                Ok(Err(e)) => {
                    error!("Watcher failed: {:#}", e);
                    Err(e)
                }
                Err(e) => Err(anyhow::Error::new(e).context("Watcher task panicked")),
            }
        }
    };

    signals_handle.close();
    outcome
}
