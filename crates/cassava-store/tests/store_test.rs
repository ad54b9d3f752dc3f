//! End-to-end tests for the state store over the embedded backend, plus
//! fallback-policy tests against a failing backend stub.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use cassava_persistence::defaults::{DEFAULT_SETTINGS, default_settings};
use cassava_persistence::traits::{
    BlocklistPersistence, PersistenceService, SettingsPersistence, SudoPersistence,
};
use cassava_persistence::{EmbeddedPersistService, Setting, StorageMode};
use cassava_store::StateStore;

fn embedded_store(owner_seed: Vec<String>) -> (StateStore, TempDir) {
    let tmp_dir = TempDir::new().unwrap();
    let service = EmbeddedPersistService::open(tmp_dir.path()).unwrap();
    (StateStore::new(Arc::new(service), owner_seed), tmp_dir)
}

// ==================== Initialization ====================

#[tokio::test]
async fn test_fresh_store_serves_compiled_defaults() {
    let (store, _tmp) = embedded_store(Vec::new());
    store.initialize().await;

    let settings = store.settings().get_all().await;
    assert_eq!(settings, default_settings());
    for (key, value) in DEFAULT_SETTINGS {
        assert_eq!(settings.get(*key).map(String::as_str), Some(*value));
    }
}

#[tokio::test]
async fn test_initialize_twice_is_a_no_op() {
    let (store, _tmp) = embedded_store(vec!["123".to_string()]);
    store.initialize().await;

    let settings_before = store.settings().get_all().await;
    let owners_before = store.sudo_owners().list().await;

    store.initialize().await;

    assert_eq!(store.settings().get_all().await, settings_before);
    assert_eq!(store.sudo_owners().list().await.len(), owners_before.len());
}

#[tokio::test]
async fn test_initialize_never_reseeds_over_explicit_value() {
    let (store, _tmp) = embedded_store(Vec::new());
    store.initialize().await;

    // An explicit value, including one equal to the default, survives
    // any number of re-initializations.
    assert!(store.settings().set("antilink", "off").await);
    store.initialize().await;
    assert_eq!(
        store.settings().get_all().await.get("antilink").map(String::as_str),
        Some("off")
    );

    assert!(store.settings().set("antilink", "on").await);
    store.initialize().await;
    assert_eq!(
        store.settings().get_all().await.get("antilink").map(String::as_str),
        Some("on")
    );
}

#[tokio::test]
async fn test_owner_seed_is_trimmed_and_deduplicated() {
    let seed = vec![
        "123".to_string(),
        " 456 ".to_string(),
        "123".to_string(),
        "".to_string(),
    ];
    let (store, _tmp) = embedded_store(seed);
    store.initialize().await;

    let owners: HashSet<String> = store.sudo_owners().list().await.into_iter().collect();
    let expected: HashSet<String> = ["123", "456"].iter().map(|s| s.to_string()).collect();
    assert_eq!(owners, expected);
}

#[tokio::test]
async fn test_reconciliation_keeps_directly_added_owners() {
    let (store, _tmp) = embedded_store(vec!["123".to_string()]);
    store.initialize().await;

    // An owner added at runtime is absent from the seed; re-running
    // initialization must not remove it.
    assert!(store.sudo_owners().add("789").await);
    store.initialize().await;

    assert!(store.sudo_owners().is_owner("789").await);
    assert!(store.sudo_owners().is_owner("123").await);
}

// ==================== Settings ====================

#[tokio::test]
async fn test_set_then_get_all_reflects_value() {
    let (store, _tmp) = embedded_store(Vec::new());
    store.initialize().await;

    assert!(store.settings().set("mode", "private").await);
    let settings = store.settings().get_all().await;
    assert_eq!(settings.get("mode").map(String::as_str), Some("private"));

    // Recognized keys stay total
    assert_eq!(settings.len(), DEFAULT_SETTINGS.len());
}

#[tokio::test]
async fn test_set_accepts_unrecognized_key() {
    let (store, _tmp) = embedded_store(Vec::new());
    store.initialize().await;

    assert!(store.settings().set("experimental", "on").await);
    let settings = store.settings().get_all().await;
    assert_eq!(settings.get("experimental").map(String::as_str), Some("on"));
}

// ==================== Sudo owners ====================

#[tokio::test]
async fn test_sudo_add_is_idempotent() {
    let (store, _tmp) = embedded_store(Vec::new());
    store.initialize().await;

    assert!(store.sudo_owners().add("123").await);
    assert!(store.sudo_owners().add("123").await);

    let owners = store.sudo_owners().list().await;
    assert_eq!(owners, vec!["123".to_string()]);
}

#[tokio::test]
async fn test_sudo_add_then_remove() {
    let (store, _tmp) = embedded_store(Vec::new());
    store.initialize().await;

    assert!(store.sudo_owners().add("123").await);
    assert!(store.sudo_owners().is_owner("123").await);

    assert!(store.sudo_owners().remove("123").await);
    assert!(!store.sudo_owners().is_owner("123").await);

    // Removing a non-member is a silent no-op success
    assert!(store.sudo_owners().remove("123").await);
}

// ==================== Blocklist ====================

#[tokio::test]
async fn test_badwords_are_case_folded() {
    let (store, _tmp) = embedded_store(Vec::new());
    store.initialize().await;

    assert!(store.blocklist().add("Spam").await);
    assert_eq!(store.blocklist().list().await, vec!["spam".to_string()]);

    assert!(store.blocklist().remove("SPAM").await);
    assert!(store.blocklist().list().await.is_empty());
}

#[tokio::test]
async fn test_badword_duplicate_folds_collapse() {
    let (store, _tmp) = embedded_store(Vec::new());
    store.initialize().await;

    assert!(store.blocklist().add("Scam").await);
    assert!(store.blocklist().add("scam").await);
    assert!(store.blocklist().add("SCAM").await);

    assert_eq!(store.blocklist().list().await, vec!["scam".to_string()]);
}

// ==================== Failure policies ====================

/// A backend where every operation fails, standing in for an unreachable
/// database.
struct FailingPersistService;

#[async_trait]
impl SettingsPersistence for FailingPersistService {
    async fn settings_find_all(&self) -> anyhow::Result<Vec<Setting>> {
        Err(anyhow::anyhow!("backend unreachable"))
    }

    async fn setting_upsert(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("backend unreachable"))
    }

    async fn setting_seed_default(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("backend unreachable"))
    }
}

#[async_trait]
impl SudoPersistence for FailingPersistService {
    async fn sudo_insert(&self, _number: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("backend unreachable"))
    }

    async fn sudo_delete(&self, _number: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("backend unreachable"))
    }

    async fn sudo_find_all(&self) -> anyhow::Result<Vec<String>> {
        Err(anyhow::anyhow!("backend unreachable"))
    }

    async fn sudo_exists(&self, _number: &str) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("backend unreachable"))
    }
}

#[async_trait]
impl BlocklistPersistence for FailingPersistService {
    async fn badword_insert(&self, _word: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("backend unreachable"))
    }

    async fn badword_delete(&self, _word: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("backend unreachable"))
    }

    async fn badword_find_all(&self) -> anyhow::Result<Vec<String>> {
        Err(anyhow::anyhow!("backend unreachable"))
    }
}

#[async_trait]
impl PersistenceService for FailingPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::ExternalDb
    }

    async fn schema_init(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("backend unreachable"))
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("backend unreachable"))
    }
}

#[tokio::test]
async fn test_settings_fail_open_to_defaults() {
    let store = StateStore::new(Arc::new(FailingPersistService), Vec::new());

    // Initialization reports the failure but never raises
    store.initialize().await;

    assert_eq!(store.settings().get_all().await, default_settings());
    assert!(!store.settings().set("mode", "private").await);
}

#[tokio::test]
async fn test_authorization_stores_fail_closed() {
    let store = StateStore::new(Arc::new(FailingPersistService), Vec::new());

    assert!(!store.sudo_owners().add("123").await);
    assert!(!store.sudo_owners().remove("123").await);
    assert!(store.sudo_owners().list().await.is_empty());
    assert!(!store.sudo_owners().is_owner("123").await);

    assert!(!store.blocklist().add("spam").await);
    assert!(!store.blocklist().remove("spam").await);
    assert!(store.blocklist().list().await.is_empty());

    assert!(store.health_check().await.is_err());
}
