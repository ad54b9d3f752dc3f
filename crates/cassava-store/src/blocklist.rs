//! Moderation blocklist store
//!
//! Words are case-folded to lower-case before storage and before lookup on
//! delete, so `"Spam"` and `"spam"` denote the same entry. `list()` returns
//! folded forms; callers fold candidate text themselves when matching.
//!
//! Failure policy: fail CLOSED to an empty list / `false`.

use std::sync::Arc;

use cassava_common::fold_word;
use cassava_persistence::PersistenceService;
use tracing::warn;

/// Add/remove/list for moderation words
#[derive(Clone)]
pub struct BlocklistStore {
    persistence: Arc<dyn PersistenceService>,
}

impl BlocklistStore {
    pub fn new(persistence: Arc<dyn PersistenceService>) -> Self {
        Self { persistence }
    }

    /// Add a word; adding an existing word is a no-op success
    pub async fn add(&self, word: &str) -> bool {
        let word = fold_word(word);
        match self.persistence.badword_insert(&word).await {
            Ok(()) => true,
            Err(e) => {
                warn!(%word, "Failed to add badword: {:#}", e);
                false
            }
        }
    }

    /// Remove a word; removing an absent word is a no-op success
    pub async fn remove(&self, word: &str) -> bool {
        let word = fold_word(word);
        match self.persistence.badword_delete(&word).await {
            Ok(()) => true,
            Err(e) => {
                warn!(%word, "Failed to remove badword: {:#}", e);
                false
            }
        }
    }

    /// Unordered snapshot of the blocklist, folded forms; empty on failure
    pub async fn list(&self) -> Vec<String> {
        match self.persistence.badword_find_all().await {
            Ok(words) => words,
            Err(e) => {
                warn!("Failed to list badwords: {:#}", e);
                Vec::new()
            }
        }
    }
}
