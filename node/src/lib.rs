//! Bido ledger context.
//!
//! Ties the staking pool and the permit authority together under one
//! configuration, and provides logging initialisation for hosts.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;

pub use config::BidoConfig;
pub use context::Bido;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
