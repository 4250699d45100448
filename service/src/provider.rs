//! Mint window source.
//!
//! The window and the wallet's minted token come from a contract read that
//! lives outside this workspace; the service only sees [`MintWindowProvider`].

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use envelope_types::{TimestampMs, TokenId, WalletAddress};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("mint window source unavailable: {0}")]
    Unavailable(String),

    #[error("invalid mint window response: {0}")]
    InvalidResponse(String),
}

/// Raw reading from the window source. Bounds are not yet validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintWindowReading {
    pub start: TimestampMs,
    pub end: TimestampMs,
    /// [`TokenId::NONE`] while the wallet has not minted.
    pub minted_token_id: TokenId,
}

#[async_trait]
pub trait MintWindowProvider: Send + Sync {
    async fn read(&self, wallet: &WalletAddress) -> Result<MintWindowReading, ProviderError>;
}

/// A provider returning a fixed reading for every wallet.
///
/// Useful when the window is known ahead of time (configuration, tests).
/// Until a reading is set, every read fails as unavailable.
pub struct StaticMintWindow {
    reading: Mutex<Option<MintWindowReading>>,
}

impl StaticMintWindow {
    pub fn new(reading: MintWindowReading) -> Self {
        Self {
            reading: Mutex::new(Some(reading)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            reading: Mutex::new(None),
        }
    }

    pub fn set(&self, reading: Option<MintWindowReading>) {
        if let Ok(mut slot) = self.reading.lock() {
            *slot = reading;
        }
    }
}

#[async_trait]
impl MintWindowProvider for StaticMintWindow {
    async fn read(&self, _wallet: &WalletAddress) -> Result<MintWindowReading, ProviderError> {
        let reading = self
            .reading
            .lock()
            .map_err(|_| ProviderError::Unavailable("reading lock poisoned".to_string()))?;
        (*reading).ok_or_else(|| ProviderError::Unavailable("no mint window configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> MintWindowReading {
        MintWindowReading {
            start: TimestampMs::new(1_000),
            end: TimestampMs::new(2_000),
            minted_token_id: TokenId::NONE,
        }
    }

    #[tokio::test]
    async fn static_window_serves_and_clears() {
        let wallet = WalletAddress::parse("0xabc").unwrap();
        let provider = StaticMintWindow::new(reading());
        assert_eq!(provider.read(&wallet).await.unwrap(), reading());

        provider.set(None);
        assert!(matches!(provider.read(&wallet).await, Err(ProviderError::Unavailable(_))));
    }

    #[tokio::test]
    async fn unavailable_until_set() {
        let wallet = WalletAddress::parse("0xabc").unwrap();
        let provider = StaticMintWindow::unavailable();
        assert!(provider.read(&wallet).await.is_err());
        provider.set(Some(reading()));
        assert!(provider.read(&wallet).await.is_ok());
    }
}
