//! The feed abstraction consumed by the reconciler.

use async_trait::async_trait;

use envelope_types::{TransactionRecord, TransferKind, WalletAddress};

use crate::FeedError;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// What to ask the feed for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedQuery {
    pub recipient: WalletAddress,
    pub kinds: Vec<TransferKind>,
    pub limit: u32,
}

impl FeedQuery {
    /// NFT and token transfers received by `recipient`.
    pub fn bridge_transfers(recipient: WalletAddress, limit: u32) -> Self {
        Self {
            recipient,
            kinds: vec![TransferKind::Nft, TransferKind::Token],
            limit,
        }
    }

    /// The `type` filter as sent on the wire, e.g. `nft,token`.
    pub fn kinds_param(&self) -> String {
        self.kinds
            .iter()
            .map(TransferKind::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One page of transactions, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedPage {
    pub transactions: Vec<TransactionRecord>,
    /// Total number of pages the feed reports for this query.
    pub page_count: u32,
}

impl FeedPage {
    /// Whether another page exists after the zero-based `cursor`.
    pub fn has_page_after(&self, cursor: u32) -> bool {
        cursor.saturating_add(1) < self.page_count
    }
}

/// A paginated, newest-first source of a wallet's bridge transactions.
#[async_trait]
pub trait TransactionFeed: Send + Sync {
    /// Fetch zero-based page `page` of `query`.
    async fn fetch_page(&self, query: &FeedQuery, page: u32) -> Result<FeedPage, FeedError>;
}
