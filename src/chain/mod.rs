//! Node Access
//!
//! Purpose:
//!     The two things the watcher consumes from the chain: a source of new
//!     headers and full blocks, and sender recovery for signed transactions.
//!
//! Architecture:
//!     source.rs   - BlockSource trait + alloy WebSocket implementation
//!     recovery.rs - SenderRecovery trait + London-rules implementation

pub mod recovery;
pub mod source;

#[cfg(test)]
pub(crate) mod fixtures;

pub use recovery::{LondonRecovery, RecoveryError, SenderRecovery};
pub use source::{AlloyBlockSource, BlockSource, HeaderStream, SourceError};
