//! Transaction data model and lifecycle state machine.

use crate::error::PayflowError;
use crate::identifiers::{BeneficiaryId, TransactionId, UserId, WalletId};
use crate::monetary::{Currency, Money};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of payment intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Funds coming into a wallet.
    Deposit,
    /// Currency exchange within the platform.
    Exchange,
    /// Payout to a beneficiary.
    Transfer,
}

/// Transaction lifecycle state.
///
/// `Pending` is the sole initial state; `Completed` and `Failed` are
/// terminal. Cancellation is modeled as a transition into `Failed` with a
/// reason code, not as a separate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Created, awaiting settlement.
    Pending,
    /// Settled successfully.
    Completed,
    /// Settlement failed or was cancelled.
    Failed,
}

impl TransactionStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Completed | TransactionStatus::Failed)
    }

    /// Get valid next states from current state.
    pub fn valid_transitions(&self) -> &[TransactionStatus] {
        match self {
            TransactionStatus::Pending => {
                &[TransactionStatus::Completed, TransactionStatus::Failed]
            }
            TransactionStatus::Completed => &[],
            TransactionStatus::Failed => &[],
        }
    }

    /// Check if transition to given state is valid.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        self.valid_transitions().contains(&next)
    }
}

/// A persisted record of a payment intent and its lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier.
    pub id: TransactionId,
    /// Owning user.
    pub user_id: UserId,
    /// Kind of payment intent.
    pub kind: TransactionKind,
    /// Source amount and currency.
    pub amount: Money,
    /// Payee, for transfers.
    pub beneficiary_id: Option<BeneficiaryId>,
    /// Current lifecycle state.
    pub status: TransactionStatus,
    /// Reason code recorded on failure (e.g. "CANCELLED").
    pub failure_reason: Option<String>,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction in the `Pending` state with a fresh
    /// identifier and creation timestamp.
    pub fn new(
        user_id: UserId,
        kind: TransactionKind,
        amount: Money,
        beneficiary_id: Option<BeneficiaryId>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            kind,
            amount,
            beneficiary_id,
            status: TransactionStatus::Pending,
            failure_reason: None,
            created_at: Utc::now(),
        }
    }

    /// Transition to a new status, recording an optional failure reason.
    ///
    /// Fails if the current status is terminal or the target is not a
    /// valid successor.
    pub fn transition_to(
        &mut self,
        next: TransactionStatus,
        reason: Option<String>,
    ) -> Result<(), PayflowError> {
        if !self.status.can_transition_to(next) {
            return Err(PayflowError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        if next == TransactionStatus::Failed {
            self.failure_reason = reason;
        }
        Ok(())
    }
}

/// A named payee with free-form bank or mobile-money details.
///
/// Only `bank_details` is intentionally unstructured; rail-specific fields
/// (account numbers, mobile wallet MSISDNs, branch codes) vary too much to
/// type here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beneficiary {
    /// Unique beneficiary identifier.
    pub id: BeneficiaryId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Currency the beneficiary is paid in.
    pub currency: Currency,
    /// Open extension map for rail-specific payout details.
    pub bank_details: Map<String, Value>,
    /// When the beneficiary was created.
    pub created_at: DateTime<Utc>,
}

impl Beneficiary {
    /// Create a new beneficiary with a fresh identifier.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        currency: Currency,
        bank_details: Map<String, Value>,
    ) -> Self {
        Self {
            id: BeneficiaryId::new(),
            user_id,
            name: name.into(),
            currency,
            bank_details,
            created_at: Utc::now(),
        }
    }
}

/// A user's balance in a single currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique wallet identifier.
    pub id: WalletId,
    /// Owning user.
    pub user_id: UserId,
    /// Wallet currency.
    pub currency: Currency,
    /// Current balance. Mutated only by settlement, which is out of core
    /// scope; the core exposes read access.
    pub balance: Decimal,
    /// Last balance update.
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a new wallet with the given opening balance.
    pub fn new(user_id: UserId, currency: Currency, balance: Decimal) -> Self {
        Self {
            id: WalletId::new(),
            user_id,
            currency,
            balance,
            updated_at: Utc::now(),
        }
    }
}
