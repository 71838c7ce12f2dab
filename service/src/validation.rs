//! Field-level validation for structured request input.

use payflow_common::{Currency, FieldIssue, TransactionKind};
use rust_decimal::Decimal;

use crate::service::{CreateBeneficiaryRequest, CreateTransactionRequest};

/// Validate a transaction creation request.
///
/// Returns an empty list when the request is acceptable. The currency
/// check is format-only: deposits may arrive in currencies the FX engine
/// does not quote, so rate table membership is not required here.
pub fn validate_transaction(request: &CreateTransactionRequest) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    if request.amount <= Decimal::ZERO {
        issues.push(FieldIssue::with_field(
            "NON_POSITIVE",
            "amount must be strictly positive",
            "amount",
        ));
    }

    if !Currency::new(request.currency.as_str()).is_well_formed() {
        issues.push(FieldIssue::with_field(
            "MALFORMED",
            "currency must be a 3-letter code",
            "currency",
        ));
    }

    // A transfer with no payee is not actionable by any settlement path
    if request.kind == TransactionKind::Transfer && request.beneficiary_id.is_none() {
        issues.push(FieldIssue::with_field(
            "MISSING",
            "transfers require a beneficiary",
            "beneficiary_id",
        ));
    }

    issues
}

/// Validate a beneficiary creation request.
pub fn validate_beneficiary(request: &CreateBeneficiaryRequest) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    if request.name.trim().chars().count() < 2 {
        issues.push(FieldIssue::with_field(
            "TOO_SHORT",
            "name must be at least 2 characters",
            "name",
        ));
    }

    if !Currency::new(request.currency.as_str()).is_well_formed() {
        issues.push(FieldIssue::with_field(
            "MALFORMED",
            "currency must be a 3-letter code",
            "currency",
        ));
    }

    issues
}
