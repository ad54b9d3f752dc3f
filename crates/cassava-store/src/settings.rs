//! Bot settings store
//!
//! Failure policy: fail OPEN. A read failure yields the compiled-in
//! defaults and a write failure yields `false`, keeping the bot functional
//! on a known-good configuration instead of surfacing backend errors.

use std::collections::HashMap;
use std::sync::Arc;

use cassava_persistence::defaults::default_settings;
use cassava_persistence::PersistenceService;
use tracing::warn;

/// Get/set of individual configuration keys
#[derive(Clone)]
pub struct SettingsStore {
    persistence: Arc<dyn PersistenceService>,
}

impl SettingsStore {
    pub fn new(persistence: Arc<dyn PersistenceService>) -> Self {
        Self { persistence }
    }

    /// The complete settings view: defaults overlaid with persisted rows
    ///
    /// Total over the recognized key set; persisted values win on
    /// conflict. Returns the pure defaults on any read failure.
    pub async fn get_all(&self) -> HashMap<String, String> {
        let mut settings = default_settings();

        match self.persistence.settings_find_all().await {
            Ok(rows) => {
                for row in rows {
                    settings.insert(row.key, row.value);
                }
            }
            Err(e) => {
                warn!("Failed to load settings, falling back to defaults: {:#}", e);
            }
        }

        settings
    }

    /// Upsert a single setting, last-write-wins
    ///
    /// Returns false on failure; callers must check the flag.
    pub async fn set(&self, key: &str, value: &str) -> bool {
        match self.persistence.setting_upsert(key, value).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key, "Failed to save setting: {:#}", e);
                false
            }
        }
    }
}
