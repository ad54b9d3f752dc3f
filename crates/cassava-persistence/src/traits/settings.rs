//! Settings persistence trait
//!
//! Defines the interface for bot-setting storage operations.

use async_trait::async_trait;

use crate::model::Setting;

/// Bot-setting persistence operations
#[async_trait]
pub trait SettingsPersistence: Send + Sync {
    /// Fetch every persisted setting row
    async fn settings_find_all(&self) -> anyhow::Result<Vec<Setting>>;

    /// Insert a setting, or overwrite its value if the key already exists
    ///
    /// Last-write-wins; no versioning.
    async fn setting_upsert(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Insert a setting only if the key is absent
    ///
    /// Used by initialization to seed defaults without clobbering values
    /// an operator has already changed.
    async fn setting_seed_default(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
