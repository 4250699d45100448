//! HTTP client for the transaction feed.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::source::{FeedPage, FeedQuery, TransactionFeed};
use crate::wire::TransactionsResponse;
use crate::FeedError;

/// Default timeout for feed requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the paginated transactions endpoint.
pub struct HttpTransactionFeed {
    base_url: String,
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
}

impl HttpTransactionFeed {
    /// Create a client with default timeout settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    /// `{base}/transactions`, tolerating a trailing slash on the base.
    pub fn endpoint(&self) -> String {
        format!("{}/transactions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TransactionFeed for HttpTransactionFeed {
    async fn fetch_page(&self, query: &FeedQuery, page: u32) -> Result<FeedPage, FeedError> {
        let url = self.endpoint();
        debug!(%url, recipient = %query.recipient, page, "fetching feed page");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("limit", query.limit.to_string()),
                ("recipient", query.recipient.to_string()),
                ("type", query.kinds_param()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::RequestFailed(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let body: TransactionsResponse = response.json().await.map_err(|e| {
            FeedError::InvalidResponse(format!("failed to parse transactions response: {e}"))
        })?;

        Ok(FeedPage::from(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envelope_types::WalletAddress;

    #[test]
    fn endpoint_trims_trailing_slash() {
        let feed = HttpTransactionFeed::new("https://feed.example/api/");
        assert_eq!(feed.endpoint(), "https://feed.example/api/transactions");
    }

    #[test]
    fn client_with_timeout_builds() {
        let feed = HttpTransactionFeed::with_timeout("http://localhost", Duration::from_secs(1));
        assert_eq!(feed.endpoint(), "http://localhost/transactions");
    }

    #[tokio::test]
    async fn unreachable_feed_is_an_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let feed = HttpTransactionFeed::with_timeout("http://127.0.0.1:9", Duration::from_secs(2));
        let query = FeedQuery::bridge_transfers(WalletAddress::parse("0xabc").unwrap(), 10);
        assert!(feed.fetch_page(&query, 0).await.is_err());
    }
}
