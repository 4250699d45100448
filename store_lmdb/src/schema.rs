//! Schema version bookkeeping.
//!
//! A fresh database (no version stored) is stamped with
//! [`CURRENT_SCHEMA_VERSION`]. A database stamped by a newer build is refused.

use heed::types::{Bytes, Str};
use heed::{Database, RoTxn, RwTxn};

use crate::LmdbError;

/// The schema version that the current code expects.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_KEY: &str = "schema_version";

pub(crate) fn read_version(rtxn: &RoTxn, meta_db: &Database<Str, Bytes>) -> Result<u32, LmdbError> {
    match meta_db.get(rtxn, SCHEMA_VERSION_KEY)? {
        Some(bytes) => {
            let arr: [u8; 4] = bytes.try_into().map_err(|_| {
                LmdbError::Serialization("schema_version has unexpected byte length".to_string())
            })?;
            Ok(u32::from_le_bytes(arr))
        }
        None => Ok(0),
    }
}

pub(crate) fn ensure_current(wtxn: &mut RwTxn, meta_db: &Database<Str, Bytes>) -> Result<(), LmdbError> {
    let found = read_version(wtxn, meta_db)?;
    if found == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }
    if found > CURRENT_SCHEMA_VERSION {
        return Err(LmdbError::UnsupportedSchema {
            found,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    tracing::info!(from = found, to = CURRENT_SCHEMA_VERSION, "stamping schema version");
    meta_db.put(wtxn, SCHEMA_VERSION_KEY, &CURRENT_SCHEMA_VERSION.to_le_bytes())?;
    Ok(())
}
