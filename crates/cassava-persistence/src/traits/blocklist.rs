//! Blocklist persistence trait
//!
//! Defines the interface for the moderation word-blocklist. Words reach
//! this layer already case-folded; the facade normalizes before storage
//! and before lookup on delete.

use async_trait::async_trait;

/// Blocklist persistence operations
#[async_trait]
pub trait BlocklistPersistence: Send + Sync {
    /// Insert a word; inserting an existing word is a no-op
    async fn badword_insert(&self, word: &str) -> anyhow::Result<()>;

    /// Delete a word; deleting an absent word is a no-op
    async fn badword_delete(&self, word: &str) -> anyhow::Result<()>;

    /// Fetch all blocklist words (unordered snapshot)
    async fn badword_find_all(&self) -> anyhow::Result<Vec<String>>;
}
