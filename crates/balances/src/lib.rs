//! Balance queries against etherscan-style chain APIs.

pub mod client;
pub mod error;

pub use client::BalanceClient;
pub use error::BalanceError;
