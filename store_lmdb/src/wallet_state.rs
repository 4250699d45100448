//! LMDB implementation of WalletStateStore.

use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env};

use envelope_store::{PersistedWalletState, StoreError, WalletReconciliationState, WalletStateStore};
use envelope_types::WalletAddress;

use crate::LmdbError;

pub struct LmdbWalletStateStore {
    pub(crate) env: Arc<Env>,
    pub(crate) wallet_state_db: Database<Str, Bytes>,
}

impl LmdbWalletStateStore {
    /// Number of wallets with a stored record.
    pub fn wallet_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.wallet_state_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }
}

impl WalletStateStore for LmdbWalletStateStore {
    fn load(&self, wallet: &WalletAddress) -> Result<Option<WalletReconciliationState>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .wallet_state_db
            .get(&rtxn, wallet.as_str())
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => Ok(Some(PersistedWalletState::from_json(bytes)?.into())),
            None => Ok(None),
        }
    }

    fn save(&self, wallet: &WalletAddress, state: &WalletReconciliationState) -> Result<(), StoreError> {
        let bytes = PersistedWalletState::from(state).to_json()?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.wallet_state_db
            .put(&mut wtxn, wallet.as_str(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
