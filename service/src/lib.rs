//! Envelope eligibility service.
//!
//! Wires the mint window provider, the transaction feed, and durable wallet
//! state into one [`EnvelopeService`] that answers "which transactions may
//! this wallet open an envelope with right now", and records the outcome of
//! opening one.

pub mod config;
pub mod error;
pub mod provider;
pub mod service;

pub use config::EnvelopeConfig;
pub use error::ServiceError;
pub use provider::{MintWindowProvider, MintWindowReading, ProviderError, StaticMintWindow};
pub use service::{EnvelopeService, LiveEnvelopeService};
