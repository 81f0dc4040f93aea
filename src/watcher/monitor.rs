//! Block Watcher: Subscription Loop
//!
//! Purpose:
//!     Follow new heads, fetch each full block, run every transaction
//!     through the address filters and post an alert for each match.
//!
//! Dependencies:
//!     - alloy (TxEnvelope accessors)
//!     - tokio (backoff sleep)
//!     - futures (header stream)
//!
//! Notes:
//!     - Processing is strictly sequential: one header, one block, one tx
//!       at a time. Filters always run before the notifier is called.
//!     - Notifier failures are logged and never stop the loop.
//!     - A broken subscription is retried per ReconnectPolicy; a header
//!       arriving resets the attempt counter. max_attempts = 0 exits on
//!       the first failure.

use alloy::consensus::{Transaction, TxEnvelope};
use anyhow::{Context, Result};
use futures::StreamExt;
use tracing::{debug, error, info, warn};

use crate::chain::{BlockSource, HeaderStream, SenderRecovery, SourceError};
use crate::config::WatchConfig;
use crate::filters::is_known_address;
use crate::notify::Notifier;
use crate::types::{BlockHeader, FetchErrorPolicy, FilterPolicy, ObservedBlock};

use super::decoder::{classify_input, CallPayload};
use super::types::{AlertMessage, NativeAmount};

pub struct BlockWatcher<S, R, N> {
    source: S,
    recovery: R,
    notifier: N,
    config: WatchConfig,
}

impl<S, R, N> BlockWatcher<S, R, N>
where
    S: BlockSource,
    R: SenderRecovery,
    N: Notifier,
{
    pub fn new(source: S, recovery: R, notifier: N, config: WatchConfig) -> Self {
        Self {
            source,
            recovery,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Run until a fatal error. Only returns `Err`: a failed startup, a
    /// fatal block fetch, or reconnect attempts exhausted.
    pub async fn run(&self) -> Result<()> {
        let chain_id = self
            .source
            .chain_id()
            .await
            .context("Failed to read chain id")?;

        let mut headers = self
            .source
            .subscribe_headers()
            .await
            .context("Failed to subscribe to new heads")?;

        info!(
            "Watching new heads | chain_id={} | filter={} | fetch_errors={:?} | routers={} | tracked={}",
            chain_id,
            self.config.filter,
            self.config.fetch_errors,
            self.config.routers,
            self.config.tracked,
        );

        let mut failures = 0u32;
        loop {
            let failure = match headers.next().await {
                Some(Ok(header)) => {
                    failures = 0;
                    self.handle_header(chain_id, header).await?;
                    continue;
                }
                Some(Err(e)) => e,
                None => SourceError::SubscriptionClosed,
            };
            headers = self.resubscribe(failure, &mut failures).await?;
        }
    }

    async fn resubscribe(
        &self,
        mut failure: SourceError,
        failures: &mut u32,
    ) -> Result<HeaderStream<'_>> {
        let policy = self.config.reconnect;
        loop {
            *failures += 1;
            if *failures > policy.max_attempts {
                error!(
                    "Header subscription failed, {} reconnects exhausted: {}",
                    policy.max_attempts, failure
                );
                return Err(anyhow::Error::new(failure).context(format!(
                    "Header subscription lost after {} reconnect attempts",
                    policy.max_attempts
                )));
            }

            let delay = policy.delay_for(*failures);
            warn!(
                "Header subscription error (reconnect {}/{}): {}, retrying in {:?}",
                failures, policy.max_attempts, failure, delay
            );
            tokio::time::sleep(delay).await;

            match self.source.subscribe_headers().await {
                Ok(stream) => {
                    info!("Resubscribed to new heads");
                    return Ok(stream);
                }
                Err(e) => failure = e,
            }
        }
    }

    async fn handle_header(&self, chain_id: u64, header: BlockHeader) -> Result<()> {
        info!("Accept block {} ({})", header.number, header.hash);

        let block = match self.source.block_by_number(header.number).await {
            Ok(Some(block)) => block,
            Ok(None) => {
                warn!("Block {} not returned by node, skipping", header.number);
                return Ok(());
            }
            Err(e) => match self.config.fetch_errors {
                FetchErrorPolicy::Fatal => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("Failed to fetch block {}", header.number)));
                }
                FetchErrorPolicy::SkipAndLog => {
                    warn!("Failed to fetch block {}: {}, skipping", header.number, e);
                    return Ok(());
                }
            },
        };

        let sent = self.process_block(chain_id, &block).await;
        info!(
            "Block {} done | txs={} | alerts={}",
            block.number,
            block.transactions.len(),
            sent
        );
        Ok(())
    }

    /// Evaluate every transaction in block order; returns alerts delivered.
    pub async fn process_block(&self, chain_id: u64, block: &ObservedBlock) -> usize {
        let mut sent = 0;
        for tx in &block.transactions {
            if let Some(alert) = self.evaluate(chain_id, tx) {
                if self.dispatch(&alert).await {
                    sent += 1;
                }
            }
        }
        sent
    }

    /// Filter one transaction and build its alert. No I/O.
    pub fn evaluate(&self, chain_id: u64, tx: &TxEnvelope) -> Option<AlertMessage> {
        let sender = match self.recovery.recover_sender(chain_id, tx) {
            Ok(addr) => addr.to_checksum(None),
            Err(e) => {
                debug!("Skipping {}: sender recovery failed: {}", tx.tx_hash(), e);
                return None;
            }
        };

        // Contract creation
        let recipient = tx.to()?.to_checksum(None);

        let value = NativeAmount::from_smallest(tx.value());
        let matched = match self.config.filter {
            FilterPolicy::ByRecipientAndSender => {
                is_known_address(&recipient, &self.config.routers)
                    && is_known_address(&sender, &self.config.tracked)
            }
            FilterPolicy::BySenderAndMinValue { min_whole_units } => {
                is_known_address(&sender, &self.config.tracked)
                    && value.meets_whole_units(min_whole_units)
            }
        };
        if !matched {
            return None;
        }

        let tx_hash = tx.tx_hash().to_string();
        let alert = match classify_input(tx.input()) {
            CallPayload::Swap { token } => AlertMessage::swap(sender, tx_hash, token, value),
            CallPayload::OtherAction => {
                let value = self.config.filter.reports_value().then_some(value);
                AlertMessage::other_action(sender, tx_hash, value)
            }
        };
        Some(alert)
    }

    async fn dispatch(&self, alert: &AlertMessage) -> bool {
        let content = alert.render();
        match self.notifier.notify(&content, self.config.mention_all).await {
            Ok(()) => {
                info!(
                    "ALERT sent | tx={} | sender={} | token={} | value={}",
                    alert.tx_hash,
                    alert.sender,
                    alert.token().unwrap_or("-"),
                    alert
                        .value
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
                true
            }
            Err(e) if e.is_transport() => {
                error!("Alert delivery failed for {}: {}", alert.tx_hash, e);
                false
            }
            Err(e) => {
                warn!("Alert refused for {}: {}", alert.tx_hash, e);
                false
            }
        }
    }
}
