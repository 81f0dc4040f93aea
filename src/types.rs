// Core data structures shared by the chain adapter and the block watcher

use alloy::consensus::TxEnvelope;
use alloy::primitives::B256;
use clap::ValueEnum;
use std::fmt;
use std::time::Duration;

/// New-head notification from the node subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub number: u64,
    pub hash: B256,
}

/// Full block as fetched after a header arrives. Transactions keep block order.
#[derive(Debug, Clone)]
pub struct ObservedBlock {
    pub number: u64,
    pub hash: B256,
    pub transactions: Vec<TxEnvelope>,
}

/// Which transactions are worth an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Recipient must be a known router AND sender a tracked wallet
    ByRecipientAndSender,
    /// Sender must be a tracked wallet moving at least `min_whole_units`
    /// of native currency (value truncated to whole units)
    BySenderAndMinValue { min_whole_units: u64 },
}

impl FilterPolicy {
    /// Fetch-error handling used when none is configured
    pub fn default_fetch_errors(&self) -> FetchErrorPolicy {
        match self {
            Self::ByRecipientAndSender => FetchErrorPolicy::Fatal,
            Self::BySenderAndMinValue { .. } => FetchErrorPolicy::SkipAndLog,
        }
    }

    /// Whether alerts carry the native value even when no swap payload was found
    pub fn reports_value(&self) -> bool {
        matches!(self, Self::BySenderAndMinValue { .. })
    }
}

impl fmt::Display for FilterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ByRecipientAndSender => write!(f, "router-and-sender"),
            Self::BySenderAndMinValue { min_whole_units } => {
                write!(f, "sender-min-value(>={})", min_whole_units)
            }
        }
    }
}

/// What to do when a block cannot be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchErrorPolicy {
    /// Stop the watcher (process exits)
    #[value(name = "fatal")]
    Fatal,
    /// Log and move on to the next header
    #[value(name = "skip")]
    SkipAndLog,
}

/// Resubscription behaviour after the header subscription fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Consecutive attempts before giving up (0 = exit on first failure)
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl ReconnectPolicy {
    pub const fn never() -> Self {
        Self {
            max_attempts: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before attempt `attempt` (1-based): base * 2^(attempt-1), capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(attempt - 1);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}
