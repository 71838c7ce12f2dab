//! PayFlow Ledger
//!
//! Stores for the user-owned record sets: transactions, beneficiaries,
//! and wallets. Each store is an async trait so the in-memory
//! implementations here can be swapped for database-backed ones without
//! touching the service layer. Every read is filtered by owning user at
//! the store boundary.

pub mod beneficiaries;
pub mod transactions;
pub mod wallets;

pub use beneficiaries::{BeneficiaryStore, InMemoryBeneficiaryStore};
pub use transactions::{InMemoryTransactionStore, TransactionStore};
pub use wallets::{InMemoryWalletStore, WalletStore};
