// Embedded persistence backend using RocksDB
// Provides local single-node storage without an external database

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cassava_common::CassavaError;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};

use crate::model::{Setting, StorageMode};
use crate::traits::PersistenceService;
use crate::traits::blocklist::BlocklistPersistence;
use crate::traits::settings::SettingsPersistence;
use crate::traits::sudo::SudoPersistence;

// Column family names, one per logical state table
pub const CF_SETTINGS: &str = "settings";
pub const CF_SUDO_OWNERS: &str = "sudo_owners";
pub const CF_BADWORDS: &str = "badwords";

/// Embedded persistence using RocksDB
///
/// Rows are JSON documents keyed by the natural key of their column
/// family. Suitable for deployments without an external database.
pub struct EmbeddedPersistService {
    db: Arc<DB>,
}

impl EmbeddedPersistService {
    /// Open (or create) the RocksDB directory at `path`
    ///
    /// Column families are created when missing, so opening doubles as
    /// the additive schema bootstrap and is idempotent across restarts.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_compression_type(rocksdb::DBCompressionType::Lz4);

        let cf_opts = Options::default();
        let cfs = vec![
            ColumnFamilyDescriptor::new(CF_SETTINGS, cf_opts.clone()),
            ColumnFamilyDescriptor::new(CF_SUDO_OWNERS, cf_opts.clone()),
            ColumnFamilyDescriptor::new(CF_BADWORDS, cf_opts),
        ];

        let db = DB::open_cf_descriptors(&db_opts, path, cfs)
            .map_err(|e| CassavaError::DatabaseError(format!("RocksDB open error: {}", e)))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Create from a raw RocksDB instance
    pub fn new(db: Arc<DB>) -> Self {
        Self { db }
    }

    /// Get a reference to the underlying RocksDB instance
    pub fn db(&self) -> Arc<DB> {
        self.db.clone()
    }

    /// Get a column family handle
    fn cf(&self, name: &str) -> anyhow::Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| anyhow::anyhow!("Column family '{}' not found", name))
    }

    /// Write a JSON value to a column family
    fn put_json(&self, cf_name: &str, key: &str, value: &serde_json::Value) -> anyhow::Result<()> {
        let cf = self.cf(cf_name)?;
        self.db
            .put_cf(cf, key.as_bytes(), value.to_string().as_bytes())
            .map_err(|e| anyhow::anyhow!("RocksDB put error: {}", e))
    }

    /// Read a JSON value from a column family
    fn get_json(&self, cf_name: &str, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
        let cf = self.cf(cf_name)?;
        match self
            .db
            .get_cf(cf, key.as_bytes())
            .map_err(|e| anyhow::anyhow!("RocksDB get error: {}", e))?
        {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    /// Delete a key from a column family
    fn delete_key(&self, cf_name: &str, key: &str) -> anyhow::Result<()> {
        let cf = self.cf(cf_name)?;
        self.db
            .delete_cf(cf, key.as_bytes())
            .map_err(|e| anyhow::anyhow!("RocksDB delete error: {}", e))
    }

    /// Collect one string field from every row of a column family
    fn collect_field(&self, cf_name: &str, field: &str) -> anyhow::Result<Vec<String>> {
        let cf = self.cf(cf_name)?;
        let mut results = Vec::new();

        let iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::Start);
        for item in iter {
            let (_, value) = item.map_err(|e| anyhow::anyhow!("RocksDB iterator error: {}", e))?;
            let json: serde_json::Value = serde_json::from_slice(&value)?;
            if let Some(v) = json[field].as_str() {
                results.push(v.to_string());
            }
        }

        Ok(results)
    }
}

// ============================================================================
// SettingsPersistence implementation
// ============================================================================

#[async_trait]
impl SettingsPersistence for EmbeddedPersistService {
    async fn settings_find_all(&self) -> anyhow::Result<Vec<Setting>> {
        let cf = self.cf(CF_SETTINGS)?;
        let mut results = Vec::new();

        let iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::Start);
        for item in iter {
            let (_, value) = item.map_err(|e| anyhow::anyhow!("RocksDB iterator error: {}", e))?;
            let json: serde_json::Value = serde_json::from_slice(&value)?;
            results.push(Setting {
                key: json["key"].as_str().unwrap_or("").to_string(),
                value: json["value"].as_str().unwrap_or("").to_string(),
            });
        }

        Ok(results)
    }

    async fn setting_upsert(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let now = chrono::Utc::now().timestamp_millis();

        // Preserve created_time when overwriting an existing row
        let existing = self.get_json(CF_SETTINGS, key)?;
        let created_time = existing
            .as_ref()
            .and_then(|v| v["created_time"].as_i64())
            .unwrap_or(now);

        let row = serde_json::json!({
            "key": key,
            "value": value,
            "created_time": created_time,
            "modified_time": now,
        });

        self.put_json(CF_SETTINGS, key, &row)
    }

    async fn setting_seed_default(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.get_json(CF_SETTINGS, key)?.is_some() {
            return Ok(());
        }

        let now = chrono::Utc::now().timestamp_millis();
        let row = serde_json::json!({
            "key": key,
            "value": value,
            "created_time": now,
            "modified_time": now,
        });

        self.put_json(CF_SETTINGS, key, &row)
    }
}

// ============================================================================
// SudoPersistence implementation
// ============================================================================

#[async_trait]
impl SudoPersistence for EmbeddedPersistService {
    async fn sudo_insert(&self, number: &str) -> anyhow::Result<()> {
        if self.get_json(CF_SUDO_OWNERS, number)?.is_some() {
            return Ok(());
        }

        let now = chrono::Utc::now().timestamp_millis();
        let row = serde_json::json!({
            "number": number,
            "created_time": now,
        });

        self.put_json(CF_SUDO_OWNERS, number, &row)
    }

    async fn sudo_delete(&self, number: &str) -> anyhow::Result<()> {
        self.delete_key(CF_SUDO_OWNERS, number)
    }

    async fn sudo_find_all(&self) -> anyhow::Result<Vec<String>> {
        self.collect_field(CF_SUDO_OWNERS, "number")
    }

    async fn sudo_exists(&self, number: &str) -> anyhow::Result<bool> {
        let cf = self.cf(CF_SUDO_OWNERS)?;
        let found = self
            .db
            .get_cf(cf, number.as_bytes())
            .map_err(|e| anyhow::anyhow!("RocksDB get error: {}", e))?;
        Ok(found.is_some())
    }
}

// ============================================================================
// BlocklistPersistence implementation
// ============================================================================

#[async_trait]
impl BlocklistPersistence for EmbeddedPersistService {
    async fn badword_insert(&self, word: &str) -> anyhow::Result<()> {
        if self.get_json(CF_BADWORDS, word)?.is_some() {
            return Ok(());
        }

        let now = chrono::Utc::now().timestamp_millis();
        let row = serde_json::json!({
            "word": word,
            "created_time": now,
        });

        self.put_json(CF_BADWORDS, word, &row)
    }

    async fn badword_delete(&self, word: &str) -> anyhow::Result<()> {
        self.delete_key(CF_BADWORDS, word)
    }

    async fn badword_find_all(&self) -> anyhow::Result<Vec<String>> {
        self.collect_field(CF_BADWORDS, "word")
    }
}

// ============================================================================
// PersistenceService implementation
// ============================================================================

#[async_trait]
impl PersistenceService for EmbeddedPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::Embedded
    }

    async fn schema_init(&self) -> anyhow::Result<()> {
        // Column families are created at open; verify the handles exist
        self.cf(CF_SETTINGS)?;
        self.cf(CF_SUDO_OWNERS)?;
        self.cf(CF_BADWORDS)?;
        Ok(())
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.cf(CF_SETTINGS)?;
        self.cf(CF_SUDO_OWNERS)?;
        self.cf(CF_BADWORDS)?;
        Ok(())
    }
}
