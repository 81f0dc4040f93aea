//! Block Watcher Module
//!
//! Purpose:
//!     Turn new blocks into chat alerts for tracked wallets.
//!
//! Created: 2026-10-19
//!
//! Architecture:
//!     types.rs   - NativeAmount (exact 10^18 scaling), AlertMessage
//!     decoder.rs - call data → token guess (trailing 20 bytes heuristic)
//!     monitor.rs - BlockWatcher: subscription loop, filters, dispatch, reconnect
//!
//! Usage:
//!     Spawned as a background task from main.rs; main blocks on the
//!     signal loop and exits without draining the watcher.

pub mod decoder;
pub mod monitor;
pub mod types;

pub use decoder::{classify_input, CallPayload};
pub use monitor::BlockWatcher;
pub use types::{AlertKind, AlertMessage, NativeAmount};
