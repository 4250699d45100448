//! Nullable transaction feed: scripted pages, no network.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use envelope_feed::{FeedError, FeedPage, FeedQuery, TransactionFeed};
use envelope_types::TransactionRecord;

/// A feed that serves pre-scripted pages and records every request.
///
/// The reported page count is the number of scripted pages unless
/// overridden with [`NullTransactionFeed::report_page_count`].
pub struct NullTransactionFeed {
    pages: Mutex<Vec<Vec<TransactionRecord>>>,
    reported_page_count: Mutex<Option<u32>>,
    failing: Mutex<HashSet<u32>>,
    stalling: Mutex<HashSet<u32>>,
    requests: Mutex<Vec<(FeedQuery, u32)>>,
}

impl NullTransactionFeed {
    pub fn new() -> Self {
        Self::with_pages(Vec::new())
    }

    pub fn with_pages(pages: Vec<Vec<TransactionRecord>>) -> Self {
        Self {
            pages: Mutex::new(pages),
            reported_page_count: Mutex::new(None),
            failing: Mutex::new(HashSet::new()),
            stalling: Mutex::new(HashSet::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replace the scripted pages (e.g. between two runs).
    pub fn set_pages(&self, pages: Vec<Vec<TransactionRecord>>) {
        *self.pages.lock().unwrap() = pages;
    }

    pub fn report_page_count(&self, count: u32) {
        *self.reported_page_count.lock().unwrap() = Some(count);
    }

    /// Make requests for `page` fail.
    pub fn fail_on(&self, page: u32) {
        self.failing.lock().unwrap().insert(page);
    }

    /// Make requests for `page` never complete.
    pub fn stall_on(&self, page: u32) {
        self.stalling.lock().unwrap().insert(page);
    }

    /// Page numbers requested so far, in order.
    pub fn fetched_pages(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|(_, p)| *p).collect()
    }

    /// The most recent query received.
    pub fn last_query(&self) -> Option<FeedQuery> {
        self.requests.lock().unwrap().last().map(|(q, _)| q.clone())
    }

    pub fn reset_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

impl Default for NullTransactionFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionFeed for NullTransactionFeed {
    async fn fetch_page(&self, query: &FeedQuery, page: u32) -> Result<FeedPage, FeedError> {
        self.requests.lock().unwrap().push((query.clone(), page));

        let stall = self.stalling.lock().unwrap().contains(&page);
        if stall {
            std::future::pending::<()>().await;
        }
        let fail = self.failing.lock().unwrap().contains(&page);
        if fail {
            return Err(FeedError::Unreachable(format!("scripted failure on page {page}")));
        }

        let pages = self.pages.lock().unwrap();
        let page_count = self
            .reported_page_count
            .lock()
            .unwrap()
            .unwrap_or(pages.len() as u32);
        Ok(FeedPage {
            transactions: pages.get(page as usize).cloned().unwrap_or_default(),
            page_count,
        })
    }
}
