//! The envelope service: mint window read, then reconciliation.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use envelope_eligibility::{EligibilityResult, ReconcileError, Reconciler};
use envelope_feed::{HttpTransactionFeed, TransactionFeed};
use envelope_store::{WalletReconciliationState, WalletStateStore};
use envelope_store_lmdb::{LmdbEnvironment, LmdbWalletStateStore};
use envelope_types::{MintWindow, TimestampMs, WalletAddress};

use crate::{EnvelopeConfig, MintWindowProvider, ServiceError};

/// Service backed by the HTTP feed and LMDB wallet state.
pub type LiveEnvelopeService<P> = EnvelopeService<HttpTransactionFeed, LmdbWalletStateStore, P>;

pub struct EnvelopeService<F, S, P> {
    reconciler: Reconciler<F, S>,
    provider: P,
}

impl<F, S, P> EnvelopeService<F, S, P>
where
    F: TransactionFeed,
    S: WalletStateStore,
    P: MintWindowProvider,
{
    pub fn new(reconciler: Reconciler<F, S>, provider: P) -> Self {
        Self {
            reconciler,
            provider,
        }
    }

    pub fn reconciler(&self) -> &Reconciler<F, S> {
        &self.reconciler
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The wallet's currently eligible transactions.
    ///
    /// A failed or inverted window read is an error; the window is never
    /// assumed. On any error the caller should show an empty list.
    pub async fn eligible(
        &self,
        wallet: &str,
        cancel: &CancellationToken,
    ) -> Result<EligibilityResult, ServiceError> {
        let address = parse_wallet(wallet)?;

        let reading = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ReconcileError::Cancelled.into()),
            reading = self.provider.read(&address) => reading,
        };
        let reading = reading.inspect_err(|e| warn!(wallet = %address, error = %e, "mint window read failed"))?;
        let window = MintWindow::new(reading.start, reading.end)?;

        let result = self
            .reconciler
            .reconcile(&window, reading.minted_token_id, address.as_str(), cancel)
            .await?;
        Ok(result)
    }

    /// Record that `wallet` opened an envelope with `txn_id`.
    ///
    /// Moves the opened cursor and consumes the transaction's skip entry.
    pub fn record_opened(
        &self,
        wallet: &str,
        txn_id: &str,
        approval_hash: &str,
        opened_at: TimestampMs,
    ) -> Result<(), ServiceError> {
        let address = parse_wallet(wallet)?;
        let cache = self.reconciler.cache();
        cache.upsert_last_checked(&address, approval_hash, opened_at);
        cache.remove_skipped(&address, [txn_id]);
        info!(wallet = %address, txn_id, %opened_at, "envelope opened");
        Ok(())
    }

    /// Record the externally selected winning approval for `wallet`.
    pub fn record_winner(&self, wallet: &str, approval_hash: &str) -> Result<(), ServiceError> {
        let address = parse_wallet(wallet)?;
        self.reconciler.cache().upsert_winning(&address, approval_hash);
        info!(wallet = %address, approval_hash, "winning approval recorded");
        Ok(())
    }

    /// The stored reconciliation state, if readable.
    pub fn wallet_state(&self, wallet: &str) -> Result<Option<WalletReconciliationState>, ServiceError> {
        let address = parse_wallet(wallet)?;
        Ok(self.reconciler.cache().get(&address))
    }
}

impl<P: MintWindowProvider> LiveEnvelopeService<P> {
    /// Build the live service: logging, LMDB state under `data_dir`, and the
    /// HTTP feed.
    pub fn from_config(config: &EnvelopeConfig, provider: P) -> Result<Self, ServiceError> {
        envelope_utils::init_logging(config.log_format, &config.log_level)?;

        let env = LmdbEnvironment::open_default(&config.data_dir)?;
        let feed = HttpTransactionFeed::with_timeout(config.feed_url.clone(), config.request_timeout());
        let reconciler = Reconciler::new(feed, env.wallet_state_store(), config.reconciler_config());

        info!(
            feed = %config.feed_url,
            data_dir = %config.data_dir.display(),
            target_chain_id = config.target_chain_id,
            "envelope service ready"
        );
        Ok(Self::new(reconciler, provider))
    }
}

fn parse_wallet(wallet: &str) -> Result<WalletAddress, ServiceError> {
    WalletAddress::parse(wallet).map_err(|_| ServiceError::Reconcile(ReconcileError::MissingWallet))
}
