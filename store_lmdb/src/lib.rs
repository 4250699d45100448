//! LMDB storage backend for wallet reconciliation state.
//!
//! Implements [`envelope_store::WalletStateStore`] using the `heed` LMDB
//! bindings. Records are stored in the persisted JSON layout, keyed by the
//! normalised wallet address.

pub mod environment;
pub mod error;
pub mod schema;
pub mod wallet_state;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use wallet_state::LmdbWalletStateStore;
