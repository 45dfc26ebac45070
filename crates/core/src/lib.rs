//! Core data types for the wallet balance monitor.

pub mod chain;
pub mod decision;
pub mod numeric;
pub mod wallet;

pub use chain::*;
pub use decision::*;
pub use numeric::*;
pub use wallet::*;
