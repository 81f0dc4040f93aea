//! Wallet Watch Library
//!
//! Follows new blocks on an EVM node and posts a chat-robot alert whenever
//! a tracked wallet sends a matching transaction.
//!
//! Created: 2026-10-19

pub mod chain;
pub mod config;
pub mod filters;
pub mod notify;
pub mod shutdown;
pub mod types;
pub mod watcher;

// Re-export commonly used types
pub use chain::{AlloyBlockSource, BlockSource, LondonRecovery, SenderRecovery};
pub use config::{CliArgs, WatchConfig};
pub use filters::{is_known_address, AddressList};
pub use notify::{Notifier, NotifyError, WebhookNotifier};
pub use types::{BlockHeader, FetchErrorPolicy, FilterPolicy, ObservedBlock, ReconnectPolicy};
pub use watcher::{AlertMessage, BlockWatcher, NativeAmount};
