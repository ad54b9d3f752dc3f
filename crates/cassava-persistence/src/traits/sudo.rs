//! Sudo-owner persistence trait
//!
//! Defines the interface for the privileged operator set.

use async_trait::async_trait;

/// Sudo-owner persistence operations
#[async_trait]
pub trait SudoPersistence: Send + Sync {
    /// Insert an operator number; inserting an existing number is a no-op
    async fn sudo_insert(&self, number: &str) -> anyhow::Result<()>;

    /// Delete an operator number; deleting an absent number is a no-op
    async fn sudo_delete(&self, number: &str) -> anyhow::Result<()>;

    /// Fetch all operator numbers (unordered snapshot)
    async fn sudo_find_all(&self) -> anyhow::Result<Vec<String>>;

    /// Check whether a number is in the operator set
    async fn sudo_exists(&self, number: &str) -> anyhow::Result<bool>;
}
