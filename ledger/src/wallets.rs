//! Wallet store.

use async_trait::async_trait;
use dashmap::DashMap;
use payflow_common::{Result, UserId, Wallet, WalletId};
use tracing::debug;

/// Persistence contract for wallets.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Persist a newly created wallet.
    async fn insert(&self, wallet: Wallet) -> Result<Wallet>;

    /// All wallets owned by the user.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Wallet>>;
}

/// In-memory wallet store keyed by wallet id.
#[derive(Default)]
pub struct InMemoryWalletStore {
    entries: DashMap<WalletId, Wallet>,
}

impl InMemoryWalletStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn insert(&self, wallet: Wallet) -> Result<Wallet> {
        debug!(wallet_id = %wallet.id, user_id = %wallet.user_id, "Wallet stored");
        self.entries.insert(wallet.id, wallet.clone());
        Ok(wallet)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Wallet>> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.user_id == *user_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}
