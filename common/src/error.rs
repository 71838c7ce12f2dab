//! Error types for PayFlow operations.

use crate::identifiers::TransactionId;
use crate::monetary::Currency;
use crate::transaction::TransactionStatus;
use thiserror::Error;

/// Main error type for PayFlow core operations.
///
/// Every variant except `Internal` is a client-input error that the request
/// layer maps to a 4xx response; none is process-fatal.
#[derive(Error, Debug)]
pub enum PayflowError {
    /// Currency code not present in the rate table.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(Currency),

    /// Amount was unparsable or non-positive.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid lifecycle state transition.
    #[error("Invalid transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Referenced entity not found (or not visible to the caller).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid caller identity.
    #[error("Unauthorized")]
    Unauthorized,

    /// Malformed structured input, with field-level issues.
    #[error("Validation failed: {}", format_issues(.0))]
    ValidationFailed(Vec<FieldIssue>),

    /// Unexpected internal fault. Logged in full; reported to callers
    /// without internal detail.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| match &i.field {
            Some(f) => format!("{} ({})", i.message, f),
            None => i.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl PayflowError {
    /// Get error code for wire-format responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            PayflowError::InvalidCurrency(_) => "INVALID_CURRENCY",
            PayflowError::InvalidAmount(_) => "INVALID_AMOUNT",
            PayflowError::InvalidTransition { .. } => "INVALID_TRANSITION",
            PayflowError::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            PayflowError::NotFound(_) => "NOT_FOUND",
            PayflowError::Unauthorized => "UNAUTHORIZED",
            PayflowError::ValidationFailed(_) => "VALIDATION_FAILED",
            PayflowError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error is the caller's fault (4xx-equivalent).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PayflowError::Internal(_))
    }
}

/// Result type alias for PayFlow operations.
pub type Result<T> = std::result::Result<T, PayflowError>;

/// A single field-level validation issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Issue code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Field that caused the issue (if applicable).
    pub field: Option<String>,
}

impl FieldIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }

    /// Create with field.
    pub fn with_field(
        code: impl Into<String>,
        message: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PayflowError::InvalidCurrency(Currency::new("XYZ")).error_code(),
            "INVALID_CURRENCY"
        );
        assert_eq!(PayflowError::Unauthorized.error_code(), "UNAUTHORIZED");
        assert_eq!(
            PayflowError::Internal("db down".into()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(PayflowError::InvalidAmount("abc".into()).is_client_error());
        assert!(PayflowError::Unauthorized.is_client_error());
        assert!(!PayflowError::Internal("storage unavailable".into()).is_client_error());
    }

    #[test]
    fn test_validation_failed_display() {
        let err = PayflowError::ValidationFailed(vec![
            FieldIssue::with_field("TOO_SMALL", "amount must be positive", "amount"),
            FieldIssue::new("MALFORMED", "bad payload"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("amount must be positive (amount)"));
        assert!(msg.contains("bad payload"));
    }
}
