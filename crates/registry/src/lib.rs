//! Spreadsheet-backed wallet and chain registry.
//!
//! Reads wallet and chain rows from the Google Sheets values API and writes
//! the balance column back after a non-suppressed evaluation.

pub mod error;
pub mod rows;
pub mod sheets;

pub use error::RegistryError;
pub use rows::{keyed_rows, SheetRow};
pub use sheets::{SheetsClient, WalletSheet};
