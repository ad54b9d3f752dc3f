//! Sudo-owner store
//!
//! Failure policy: fail CLOSED. This set gates privileged commands, so a
//! backend failure yields an empty list and a `false` membership answer;
//! a database hiccup must never grant privilege.

use std::sync::Arc;

use cassava_persistence::PersistenceService;
use tracing::warn;

/// Add/remove/list/membership-check for privileged operator numbers
#[derive(Clone)]
pub struct SudoOwnerStore {
    persistence: Arc<dyn PersistenceService>,
}

impl SudoOwnerStore {
    pub fn new(persistence: Arc<dyn PersistenceService>) -> Self {
        Self { persistence }
    }

    /// Add a number to the operator set; adding a member is a no-op success
    pub async fn add(&self, number: &str) -> bool {
        match self.persistence.sudo_insert(number).await {
            Ok(()) => true,
            Err(e) => {
                warn!(number, "Failed to add sudo owner: {:#}", e);
                false
            }
        }
    }

    /// Remove a number; removing a non-member is a no-op success
    pub async fn remove(&self, number: &str) -> bool {
        match self.persistence.sudo_delete(number).await {
            Ok(()) => true,
            Err(e) => {
                warn!(number, "Failed to remove sudo owner: {:#}", e);
                false
            }
        }
    }

    /// Unordered snapshot of the operator set; empty on failure
    pub async fn list(&self) -> Vec<String> {
        match self.persistence.sudo_find_all().await {
            Ok(numbers) => numbers,
            Err(e) => {
                warn!("Failed to list sudo owners: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Whether a number is in the operator set; false on failure
    pub async fn is_owner(&self, number: &str) -> bool {
        match self.persistence.sudo_exists(number).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(number, "Failed to check sudo owner: {:#}", e);
                false
            }
        }
    }
}
