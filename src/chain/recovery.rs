//! Sender Recovery
//!
//! Recovers the originating address of a signed transaction for a fixed
//! chain id, following London-fork signer rules: legacy (EIP-155 or
//! unprotected), EIP-2930 and EIP-1559 envelopes are accepted; blob and
//! set-code transactions are not; a replay-protected transaction signed
//! for another chain is rejected.

use alloy::consensus::transaction::SignerRecoverable;
use alloy::consensus::{Transaction, TxEnvelope, TxType};
use alloy::primitives::Address;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("transaction type {0:?} not supported by the London signer")]
    UnsupportedType(TxType),
    #[error("chain id mismatch: expected {expected}, transaction has {found}")]
    ChainIdMismatch { expected: u64, found: u64 },
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}

pub trait SenderRecovery: Send + Sync {
    fn recover_sender(&self, chain_id: u64, tx: &TxEnvelope) -> Result<Address, RecoveryError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LondonRecovery;

impl SenderRecovery for LondonRecovery {
    fn recover_sender(&self, chain_id: u64, tx: &TxEnvelope) -> Result<Address, RecoveryError> {
        match tx.tx_type() {
            TxType::Legacy | TxType::Eip2930 | TxType::Eip1559 => {}
            other => return Err(RecoveryError::UnsupportedType(other)),
        }

        // Unprotected legacy transactions carry no chain id
        if let Some(found) = tx.chain_id() {
            if found != chain_id {
                return Err(RecoveryError::ChainIdMismatch {
                    expected: chain_id,
                    found,
                });
            }
        }

        tx.recover_signer()
            .map_err(|e| RecoveryError::InvalidSignature(e.to_string()))
    }
}
