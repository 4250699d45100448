//! The eligibility reconciler.
//!
//! One run pages backward through the feed (newest first), one page at a
//! time, because each page decides whether the next one is needed. A run is
//! all-or-nothing: a feed failure or cancellation returns an error, and the
//! skip list is only written after every page has been processed.

use std::collections::{BTreeSet, HashSet};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use envelope_approval::{decode, DecodedApproval};
use envelope_feed::{FeedPage, FeedQuery, TransactionFeed};
use envelope_store::{WalletReconciliationState, WalletStateCache, WalletStateStore};
use envelope_types::{MintWindow, TimestampMs, TokenId, TransactionRecord, WalletAddress};

use crate::classify::page_edges_relevant;
use crate::{PageProbe, ReconcileError, ReconcilerConfig};

/// An eligible transaction together with its decoded approval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EligibleTransaction {
    pub record: TransactionRecord,
    pub approval: DecodedApproval,
}

/// Outcome of a successful run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EligibilityResult {
    /// Ascending by approval timestamp: the earliest candidate comes first.
    pub eligible: Vec<EligibleTransaction>,
    /// Set when the stored winning approval was re-surfaced.
    pub winner_found: bool,
    /// Ids added to the skip list by this run.
    pub newly_skipped: BTreeSet<String>,
    pub pages_fetched: u32,
}

impl EligibilityResult {
    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }

    pub fn transactions(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.eligible.iter().map(|e| &e.record)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.eligible.iter().map(|e| e.record.id.as_str()).collect()
    }
}

/// Why paging stopped early.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PageFlow {
    Continue,
    /// The stored winner was found; nothing else matters.
    Winner,
    /// A redeemed approval older than the window start: everything further
    /// back is older still.
    Boundary,
}

/// Accumulated state of one run.
struct Scan<'a> {
    window: &'a MintWindow,
    minted_token_id: TokenId,
    prior: &'a WalletReconciliationState,
    last_opened: TimestampMs,
    eligible: Vec<EligibleTransaction>,
    winner: Option<EligibleTransaction>,
    seen: HashSet<String>,
    new_skipped: BTreeSet<String>,
}

impl Scan<'_> {
    fn push(&mut self, record: &TransactionRecord, approval: DecodedApproval) {
        if self.seen.insert(record.id.clone()) {
            self.eligible.push(EligibleTransaction {
                record: record.clone(),
                approval,
            });
        }
    }

    fn is_winner(&self, approval: &DecodedApproval) -> bool {
        self.minted_token_id.is_none()
            && self
                .prior
                .winning_approval_hash
                .as_deref()
                .is_some_and(|winning| approval.hash.matches(winning))
    }
}

/// Decides which of a wallet's bridge transactions may open an envelope.
pub struct Reconciler<F, S> {
    feed: F,
    cache: WalletStateCache<S>,
    config: ReconcilerConfig,
}

impl<F: TransactionFeed, S: WalletStateStore> Reconciler<F, S> {
    pub fn new(feed: F, store: S, config: ReconcilerConfig) -> Self {
        Self {
            feed,
            cache: WalletStateCache::new(store),
            config: config.validated(),
        }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn cache(&self) -> &WalletStateCache<S> {
        &self.cache
    }

    /// Compute the wallet's currently eligible transactions.
    ///
    /// `window` must already be validated (`start <= end`). On any error
    /// nothing is persisted and the caller should treat the result as empty.
    pub async fn reconcile(
        &self,
        window: &MintWindow,
        minted_token_id: TokenId,
        wallet: &str,
        cancel: &CancellationToken,
    ) -> Result<EligibilityResult, ReconcileError> {
        let wallet = WalletAddress::parse(wallet).map_err(|_| ReconcileError::MissingWallet)?;
        let span = info_span!("reconcile", %wallet, minted = %minted_token_id);
        self.run(window, minted_token_id, &wallet, cancel)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        window: &MintWindow,
        minted_token_id: TokenId,
        wallet: &WalletAddress,
        cancel: &CancellationToken,
    ) -> Result<EligibilityResult, ReconcileError> {
        let prior = self.cache.get(wallet).unwrap_or_default();
        let mut scan = Scan {
            window,
            minted_token_id,
            prior: &prior,
            last_opened: prior.last_opened_or(window.start),
            eligible: Vec::new(),
            winner: None,
            seen: HashSet::new(),
            new_skipped: BTreeSet::new(),
        };

        let query = FeedQuery::bridge_transfers(wallet.clone(), self.config.page_size);
        let mut cursor = 0u32;
        let mut pages_fetched = 0u32;

        let flow = loop {
            let page = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ReconcileError::Cancelled),
                page = self.feed.fetch_page(&query, cursor) => page?,
            };
            pages_fetched += 1;

            let flow = self.scan_page(&page, &mut scan);
            debug!(
                page = cursor,
                page_count = page.page_count,
                records = page.transactions.len(),
                eligible = scan.eligible.len(),
                ?flow,
                "scanned feed page"
            );

            if flow != PageFlow::Continue || !page.has_page_after(cursor) {
                break flow;
            }
            cursor += 1;
        };

        if cancel.is_cancelled() {
            return Err(ReconcileError::Cancelled);
        }

        debug!(?flow, "paging finished");
        let winner_found = scan.winner.is_some();
        let mut eligible = match scan.winner {
            Some(winner) => vec![winner],
            None => scan.eligible,
        };
        eligible.reverse();
        eligible.sort_by_key(|e| e.approval.timestamp);

        let newly_skipped: BTreeSet<String> = scan
            .new_skipped
            .into_iter()
            .filter(|id| !prior.is_skipped(id))
            .collect();
        if !newly_skipped.is_empty() {
            self.cache
                .add_skipped(wallet, newly_skipped.iter().map(String::as_str));
        }

        info!(
            eligible = eligible.len(),
            winner_found,
            newly_skipped = newly_skipped.len(),
            pages_fetched,
            "reconciliation complete"
        );

        Ok(EligibilityResult {
            eligible,
            winner_found,
            newly_skipped,
            pages_fetched,
        })
    }

    fn scan_page(&self, page: &FeedPage, scan: &mut Scan<'_>) -> PageFlow {
        let records = page.transactions.as_slice();
        let relevant = match self.config.page_probe {
            PageProbe::Exhaustive => true,
            PageProbe::Edges => page_edges_relevant(records, scan.window, self.config.grace_period_ms),
        };

        if !relevant {
            return match records.last().and_then(approval_of) {
                Some(approval) if scan.window.is_before_start(approval.timestamp) => PageFlow::Boundary,
                _ => PageFlow::Continue,
            };
        }

        for txn in records {
            if txn.destination_chain_id != self.config.target_chain_id {
                continue;
            }

            if let Some(bytes) = txn.redeemed_approval() {
                let approval = match decode(bytes) {
                    Ok(approval) => approval,
                    Err(e) => {
                        warn!(id = %txn.id, error = %e, "skipping transaction with malformed approval");
                        continue;
                    }
                };
                let t = approval.timestamp;

                if scan.window.contains(t) {
                    if scan.is_winner(&approval) {
                        info!(id = %txn.id, hash = %approval.hash, "winning approval re-surfaced");
                        scan.winner = Some(EligibleTransaction {
                            record: txn.clone(),
                            approval,
                        });
                        return PageFlow::Winner;
                    }
                    if t > scan.last_opened || scan.prior.is_skipped(&txn.id) {
                        scan.push(txn, approval);
                    }
                } else if scan.window.is_before_start(t) {
                    return PageFlow::Boundary;
                }
            } else if txn.status.is_in_flight() && txn.created_at >= scan.window.start {
                scan.new_skipped.insert(txn.id.clone());
            }
        }

        PageFlow::Continue
    }
}

fn approval_of(txn: &TransactionRecord) -> Option<DecodedApproval> {
    txn.redeemed_approval().and_then(|bytes| decode(bytes).ok())
}
