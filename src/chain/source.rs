//! Block Source: New Heads + Block Fetch
//!
//! Purpose:
//!     Wrap the node's WebSocket JSON-RPC behind a small trait so the
//!     watcher loop can be driven by a real node or by an in-memory fake.
//!
//! Dependencies:
//!     - alloy (WS provider, newHeads subscription, eth_getBlockByNumber)
//!     - futures (stream adapters)
//!
//! Notes:
//!     - The alloy subscription stream simply ends when the socket drops.
//!       That end is surfaced as a final `SubscriptionClosed` error item so
//!       the watcher handles it on its error path.

use alloy::providers::{DynProvider, Provider, ProviderBuilder, WsConnect};
use alloy::rpc::types::BlockNumberOrTag;
use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use std::pin::Pin;
use thiserror::Error;
use tracing::debug;

use crate::types::{BlockHeader, ObservedBlock};

/// Stream of new heads; an `Err` item means the subscription is broken.
pub type HeaderStream<'a> = Pin<Box<dyn Stream<Item = Result<BlockHeader, SourceError>> + Send + 'a>>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("rpc error: {0}")]
    Rpc(String),
    #[error("header subscription closed")]
    SubscriptionClosed,
}

impl SourceError {
    fn rpc(err: impl std::fmt::Display) -> Self {
        Self::Rpc(err.to_string())
    }
}

#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Chain identifier used for sender recovery; read once at startup.
    async fn chain_id(&self) -> Result<u64, SourceError>;

    async fn subscribe_headers(&self) -> Result<HeaderStream<'_>, SourceError>;

    /// `Ok(None)` when the node does not know the block (yet).
    async fn block_by_number(&self, number: u64) -> Result<Option<ObservedBlock>, SourceError>;
}

/// `BlockSource` over an alloy WebSocket provider
pub struct AlloyBlockSource {
    provider: DynProvider,
}

impl AlloyBlockSource {
    pub async fn connect(ws_url: &str) -> Result<Self, SourceError> {
        let provider = ProviderBuilder::new()
            .connect_ws(WsConnect::new(ws_url))
            .await
            .map_err(SourceError::rpc)?;

        Ok(Self {
            provider: provider.erased(),
        })
    }

    pub async fn latest_block_number(&self) -> Result<u64, SourceError> {
        self.provider
            .get_block_number()
            .await
            .map_err(SourceError::rpc)
    }
}

#[async_trait]
impl BlockSource for AlloyBlockSource {
    async fn chain_id(&self) -> Result<u64, SourceError> {
        self.provider.get_chain_id().await.map_err(SourceError::rpc)
    }

    async fn subscribe_headers(&self) -> Result<HeaderStream<'_>, SourceError> {
        let subscription = self
            .provider
            .subscribe_blocks()
            .await
            .map_err(SourceError::rpc)?;

        let headers = subscription
            .into_stream()
            .map(|header| {
                Ok(BlockHeader {
                    number: header.inner.number,
                    hash: header.hash,
                })
            })
            .chain(stream::once(async { Err(SourceError::SubscriptionClosed) }));

        Ok(Box::pin(headers))
    }

    async fn block_by_number(&self, number: u64) -> Result<Option<ObservedBlock>, SourceError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .full()
            .await
            .map_err(SourceError::rpc)?;

        Ok(block.map(|block| {
            let transactions: Vec<_> = block
                .transactions
                .into_transactions()
                .map(|tx| tx.inner.into_inner())
                .collect();
            debug!("Fetched block {} ({} txs)", number, transactions.len());

            ObservedBlock {
                number: block.header.inner.number,
                hash: block.header.hash,
                transactions,
            }
        }))
    }
}
