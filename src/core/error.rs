//! Failure kinds of a single currency conversion

use thiserror::Error;

/// Why a conversion did not produce a value.
///
/// Every variant is terminal for the call that produced it; nothing is retried.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The request never got a complete response (connect, DNS, timeout, body read).
    #[error("Request to the exchange rate service failed")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a status other than 200. The body is kept verbatim.
    #[error("{body}")]
    Upstream { status: u16, body: String },

    /// The 200 response body did not match the expected rate table shape.
    #[error("Failed to decode exchange rate response")]
    Decode(#[from] serde_json::Error),

    /// The rate table has no entry for the requested currency.
    #[error("'{0}' rate not found")]
    RateNotFound(String),
}

impl From<reqwest::Error> for ConversionError {
    fn from(err: reqwest::Error) -> Self {
        ConversionError::Transport(err)
    }
}
