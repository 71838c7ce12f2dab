//! The payment service facade.

use std::sync::Arc;

use payflow_common::{
    Beneficiary, BeneficiaryId, Currency, Money, PayflowError, Result, Transaction,
    TransactionId, TransactionKind, TransactionStatus, UserId, Wallet,
};
use payflow_fx::{Quote, QuoteEngine, RateTable};
use payflow_ledger::{
    BeneficiaryStore, InMemoryBeneficiaryStore, InMemoryTransactionStore, InMemoryWalletStore,
    TransactionStore, WalletStore,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::config::ServiceConfig;
use crate::validation;

/// Request to create a payment intent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionRequest {
    /// Kind of payment intent.
    #[serde(rename = "payment_type")]
    pub kind: TransactionKind,
    /// Source amount.
    pub amount: Decimal,
    /// Source currency code (format-checked, not rate-table-checked).
    pub currency: String,
    /// Payee, required for transfers.
    pub beneficiary_id: Option<BeneficiaryId>,
}

/// Request to create a beneficiary.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBeneficiaryRequest {
    /// Display name.
    pub name: String,
    /// Payout currency code.
    pub currency: String,
    /// Rail-specific payout details.
    pub bank_details: Map<String, Value>,
}

/// The operations PayFlow exposes to the request layer.
///
/// Every owned operation takes an opaque, upstream-authenticated
/// `UserId`; the service checks only that one is present and well-formed.
pub struct PaymentService {
    engine: QuoteEngine,
    transactions: Arc<dyn TransactionStore>,
    beneficiaries: Arc<dyn BeneficiaryStore>,
    wallets: Arc<dyn WalletStore>,
}

impl PaymentService {
    /// Create a service over explicit stores.
    pub fn new(
        engine: QuoteEngine,
        transactions: Arc<dyn TransactionStore>,
        beneficiaries: Arc<dyn BeneficiaryStore>,
        wallets: Arc<dyn WalletStore>,
    ) -> Self {
        Self {
            engine,
            transactions,
            beneficiaries,
            wallets,
        }
    }

    /// Create a service with fresh in-memory stores.
    pub fn in_memory(config: &ServiceConfig, rates: RateTable) -> Self {
        Self::new(
            QuoteEngine::new(rates, config.quote_config()),
            Arc::new(InMemoryTransactionStore::new()),
            Arc::new(InMemoryBeneficiaryStore::new()),
            Arc::new(InMemoryWalletStore::new()),
        )
    }

    /// Current base rates, for display.
    pub fn rates(&self) -> Vec<(Currency, Decimal)> {
        self.engine.rates().entries()
    }

    /// Compute an FX quote from raw request parameters.
    #[instrument(skip(self))]
    pub fn get_quote(&self, from: &str, to: &str, amount: &str) -> Result<Quote> {
        let quote = self.engine.quote_str(from, to, amount)?;
        info!(
            quote_id = %quote.id,
            from = %quote.from_currency,
            to = %quote.to_currency,
            applied_rate = %quote.applied_rate,
            "Quote issued"
        );
        Ok(quote)
    }

    /// Record a new payment intent in the `Pending` state.
    #[instrument(skip(self, request), fields(user_id = %user_id, kind = ?request.kind))]
    pub async fn create_transaction(
        &self,
        user_id: &UserId,
        request: CreateTransactionRequest,
    ) -> Result<Transaction> {
        self.authorize(user_id)?;

        let issues = validation::validate_transaction(&request);
        if !issues.is_empty() {
            return Err(PayflowError::ValidationFailed(issues));
        }

        // A supplied payee must exist and belong to the caller
        if let Some(beneficiary_id) = request.beneficiary_id {
            self.beneficiaries
                .get_for_user(beneficiary_id, user_id)
                .await?;
        }

        let transaction = Transaction::new(
            user_id.clone(),
            request.kind,
            Money::new(request.amount, Currency::new(request.currency)),
            request.beneficiary_id,
        );
        let transaction = self.transactions.insert(transaction).await?;

        info!(
            transaction_id = %transaction.id,
            amount = %transaction.amount,
            "Transaction created"
        );
        Ok(transaction)
    }

    /// All transactions owned by the caller, most recent first.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_transactions(&self, user_id: &UserId) -> Result<Vec<Transaction>> {
        self.authorize(user_id)?;
        self.transactions.list_for_user(user_id).await
    }

    /// Apply a settlement outcome to a transaction.
    ///
    /// Called by the (external) settlement path, not by end users; there
    /// is no ownership check. Only transitions into a terminal state are
    /// accepted, and a transaction already terminal stays unchanged.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        transaction_id: TransactionId,
        status: TransactionStatus,
        reason: Option<String>,
    ) -> Result<Transaction> {
        self.transactions
            .update_status(transaction_id, status, reason)
            .await
    }

    /// Register a new beneficiary for the caller.
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn create_beneficiary(
        &self,
        user_id: &UserId,
        request: CreateBeneficiaryRequest,
    ) -> Result<Beneficiary> {
        self.authorize(user_id)?;

        let issues = validation::validate_beneficiary(&request);
        if !issues.is_empty() {
            return Err(PayflowError::ValidationFailed(issues));
        }

        let beneficiary = Beneficiary::new(
            user_id.clone(),
            request.name,
            Currency::new(request.currency),
            request.bank_details,
        );
        let beneficiary = self.beneficiaries.insert(beneficiary).await?;

        info!(beneficiary_id = %beneficiary.id, "Beneficiary created");
        Ok(beneficiary)
    }

    /// All beneficiaries owned by the caller, most recent first.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_beneficiaries(&self, user_id: &UserId) -> Result<Vec<Beneficiary>> {
        self.authorize(user_id)?;
        self.beneficiaries.list_for_user(user_id).await
    }

    /// All wallets owned by the caller.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_wallets(&self, user_id: &UserId) -> Result<Vec<Wallet>> {
        self.authorize(user_id)?;
        self.wallets.list_for_user(user_id).await
    }

    /// Seed a wallet directly (demo and test wiring).
    pub async fn seed_wallet(&self, wallet: Wallet) -> Result<Wallet> {
        self.wallets.insert(wallet).await
    }

    fn authorize(&self, user_id: &UserId) -> Result<()> {
        if !user_id.is_valid() {
            return Err(PayflowError::Unauthorized);
        }
        Ok(())
    }
}
