//! FX engine error types.

use payflow_common::{Currency, PayflowError};
use thiserror::Error;

/// Errors that can occur in the FX engine.
#[derive(Debug, Error)]
pub enum FxError {
    /// Currency code not present in the rate table.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(Currency),

    /// Amount was unparsable or non-positive.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Rate table construction rejected a rate.
    #[error("Invalid rate for {currency}: {reason}")]
    InvalidRate { currency: Currency, reason: String },
}

impl From<FxError> for PayflowError {
    fn from(err: FxError) -> Self {
        match err {
            FxError::UnknownCurrency(currency) => PayflowError::InvalidCurrency(currency),
            FxError::InvalidAmount(msg) => PayflowError::InvalidAmount(msg),
            FxError::InvalidRate { currency, reason } => {
                PayflowError::Internal(format!("bad rate table entry for {currency}: {reason}"))
            }
        }
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
