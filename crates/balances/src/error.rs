//! Error types for balance queries.

use thiserror::Error;

/// Errors that can occur fetching a wallet balance.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// The wallet references a network absent from the chain registry.
    /// Recoverable: the caller skips the wallet and continues the run.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// The API answered with an explicit failure status; carries the API's
    /// own message.
    #[error("balance API error: {0}")]
    Api(String),

    /// Network or HTTP-level failure reaching the API.
    #[error("balance request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not contain a usable balance.
    #[error("malformed balance response: {0}")]
    Malformed(String),
}
