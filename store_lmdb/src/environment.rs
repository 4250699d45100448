//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};

use crate::schema;
use crate::{LmdbError, LmdbWalletStateStore};

/// Name of the database holding one record per wallet.
pub const WALLET_STATE_DB: &str = "wallet_state";

/// Name of the bookkeeping database (schema version).
pub const META_DB: &str = "meta";

/// Default map size: 64 MiB is plenty for per-wallet records.
pub const DEFAULT_MAP_SIZE: usize = 64 * 1024 * 1024;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    wallet_state_db: Database<Str, Bytes>,
    meta_db: Database<Str, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// Creates the directory if needed and refuses databases written with a
    /// newer schema.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per path by this process and
        // the memory map is never accessed outside heed's transactions.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let wallet_state_db: Database<Str, Bytes> =
            env.create_database(&mut wtxn, Some(WALLET_STATE_DB))?;
        let meta_db: Database<Str, Bytes> = env.create_database(&mut wtxn, Some(META_DB))?;
        schema::ensure_current(&mut wtxn, &meta_db)?;
        wtxn.commit()?;

        tracing::info!(path = %path.display(), "opened wallet state database");

        Ok(Self {
            env: Arc::new(env),
            wallet_state_db,
            meta_db,
        })
    }

    /// Open with the default database count and map size.
    pub fn open_default(path: &Path) -> Result<Self, LmdbError> {
        Self::open(path, 4, DEFAULT_MAP_SIZE)
    }

    /// A store handle sharing this environment.
    pub fn wallet_state_store(&self) -> LmdbWalletStateStore {
        LmdbWalletStateStore {
            env: Arc::clone(&self.env),
            wallet_state_db: self.wallet_state_db,
        }
    }

    /// The schema version recorded in the meta database.
    pub fn schema_version(&self) -> Result<u32, LmdbError> {
        let rtxn = self.env.read_txn()?;
        schema::read_version(&rtxn, &self.meta_db)
    }
}
