//! Transaction feed client.
//!
//! The feed is an external HTTP API returning a wallet's bridge transactions
//! newest-first, one page at a time:
//!
//! `GET {base}/transactions?limit=L&recipient=<address>&type=nft,token&page=<n>`
//! → `{"results": {"transactions": [...], "page": <page count>}}`
//!
//! The reconciler depends only on the [`TransactionFeed`] trait.

pub mod client;
pub mod error;
pub mod source;
pub mod wire;

pub use client::HttpTransactionFeed;
pub use error::FeedError;
pub use source::{FeedPage, FeedQuery, TransactionFeed};
