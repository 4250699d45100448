//! Shared utilities for the envelope eligibility engine.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
