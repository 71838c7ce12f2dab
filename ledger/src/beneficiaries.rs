//! Beneficiary store.

use async_trait::async_trait;
use dashmap::DashMap;
use payflow_common::{Beneficiary, BeneficiaryId, PayflowError, Result, UserId};
use tracing::debug;

/// Persistence contract for beneficiaries.
#[async_trait]
pub trait BeneficiaryStore: Send + Sync {
    /// Persist a newly created beneficiary.
    async fn insert(&self, beneficiary: Beneficiary) -> Result<Beneficiary>;

    /// Fetch a beneficiary by id, visible only to its owner.
    async fn get_for_user(&self, id: BeneficiaryId, user_id: &UserId) -> Result<Beneficiary>;

    /// All beneficiaries owned by the user, most recent first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Beneficiary>>;
}

/// In-memory beneficiary store keyed by beneficiary id.
#[derive(Default)]
pub struct InMemoryBeneficiaryStore {
    entries: DashMap<BeneficiaryId, Beneficiary>,
}

impl InMemoryBeneficiaryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

#[async_trait]
impl BeneficiaryStore for InMemoryBeneficiaryStore {
    async fn insert(&self, beneficiary: Beneficiary) -> Result<Beneficiary> {
        debug!(
            beneficiary_id = %beneficiary.id,
            user_id = %beneficiary.user_id,
            "Beneficiary stored"
        );
        self.entries.insert(beneficiary.id, beneficiary.clone());
        Ok(beneficiary)
    }

    async fn get_for_user(&self, id: BeneficiaryId, user_id: &UserId) -> Result<Beneficiary> {
        // Ownership is checked here, not at the presentation layer: a
        // foreign beneficiary is indistinguishable from a missing one.
        self.entries
            .get(&id)
            .filter(|entry| entry.user_id == *user_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| PayflowError::NotFound(format!("beneficiary {id}")))
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Beneficiary>> {
        let mut beneficiaries: Vec<Beneficiary> = self
            .entries
            .iter()
            .filter(|entry| entry.user_id == *user_id)
            .map(|entry| entry.value().clone())
            .collect();

        beneficiaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(beneficiaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payflow_common::Currency;
    use serde_json::{json, Map};

    fn mpesa_details() -> Map<String, serde_json::Value> {
        let mut details = Map::new();
        details.insert("provider".to_string(), json!("M-PESA"));
        details.insert("phone".to_string(), json!("+254700000000"));
        details
    }

    fn make_beneficiary(user: &str, name: &str) -> Beneficiary {
        Beneficiary::new(UserId::new(user), name, Currency::kes(), mpesa_details())
    }

    #[tokio::test]
    async fn test_insert_and_get_for_owner() {
        let store = InMemoryBeneficiaryStore::new();
        let ben = store
            .insert(make_beneficiary("user-a", "Wanjiku"))
            .await
            .unwrap();

        let fetched = store
            .get_for_user(ben.id, &UserId::new("user-a"))
            .await
            .unwrap();
        assert_eq!(fetched.name, "Wanjiku");
        assert_eq!(fetched.bank_details["provider"], json!("M-PESA"));
    }

    #[tokio::test]
    async fn test_foreign_beneficiary_is_not_found() {
        let store = InMemoryBeneficiaryStore::new();
        let ben = store
            .insert(make_beneficiary("user-a", "Wanjiku"))
            .await
            .unwrap();

        let result = store.get_for_user(ben.id, &UserId::new("user-b")).await;
        assert!(matches!(result, Err(PayflowError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filtered_and_ordered() {
        let store = InMemoryBeneficiaryStore::new();
        store.insert(make_beneficiary("user-a", "First")).await.unwrap();
        store.insert(make_beneficiary("user-b", "Other")).await.unwrap();
        store.insert(make_beneficiary("user-a", "Second")).await.unwrap();

        let listed = store.list_for_user(&UserId::new("user-a")).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|b| b.user_id == UserId::new("user-a")));
        assert!(listed[0].created_at >= listed[1].created_at);
    }
}
