//! Transaction store.

use async_trait::async_trait;
use dashmap::DashMap;
use payflow_common::{
    PayflowError, Result, Transaction, TransactionId, TransactionStatus, UserId,
};
use tracing::{debug, info};

/// Persistence contract for transactions.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persist a newly created transaction.
    async fn insert(&self, transaction: Transaction) -> Result<Transaction>;

    /// Fetch a transaction by id.
    async fn get(&self, id: TransactionId) -> Result<Transaction>;

    /// All transactions owned by the user, most recent first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Transaction>>;

    /// Apply a status transition to a transaction.
    ///
    /// Implementations must serialize concurrent updates to the same
    /// transaction so that of two simultaneous terminal transitions,
    /// exactly one succeeds and the other observes `InvalidTransition`.
    async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
        reason: Option<String>,
    ) -> Result<Transaction>;
}

/// In-memory transaction store keyed by transaction id.
#[derive(Default)]
pub struct InMemoryTransactionStore {
    entries: DashMap<TransactionId, Transaction>,
}

impl InMemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of stored transactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no transactions are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, transaction: Transaction) -> Result<Transaction> {
        if self.entries.contains_key(&transaction.id) {
            // Random v4 ids make this unreachable in practice
            return Err(PayflowError::Internal(format!(
                "duplicate transaction id {}",
                transaction.id
            )));
        }

        debug!(
            transaction_id = %transaction.id,
            user_id = %transaction.user_id,
            "Transaction stored"
        );
        self.entries.insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn get(&self, id: TransactionId) -> Result<Transaction> {
        self.entries
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(PayflowError::TransactionNotFound(id))
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .entries
            .iter()
            .filter(|entry| entry.user_id == *user_id)
            .map(|entry| entry.value().clone())
            .collect();

        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
        reason: Option<String>,
    ) -> Result<Transaction> {
        // The entry guard holds the shard lock, serializing concurrent
        // updates to the same transaction.
        let mut entry = self
            .entries
            .get_mut(&id)
            .ok_or(PayflowError::TransactionNotFound(id))?;

        entry.transition_to(status, reason)?;

        info!(
            transaction_id = %id,
            status = ?entry.status,
            "Transaction status updated"
        );
        Ok(entry.clone())
    }
}
