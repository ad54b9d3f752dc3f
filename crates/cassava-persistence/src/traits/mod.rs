//! Persistence traits for the unified storage abstraction layer
//!
//! This module defines the core persistence traits that abstract over the
//! two storage backends: external database (MySQL/PostgreSQL) and embedded
//! (RocksDB). Backend-level errors propagate out of these methods as
//! `anyhow::Error`; converting them into safe fallbacks is the store
//! facades' responsibility, one layer up.

pub mod blocklist;
pub mod settings;
pub mod sudo;

pub use blocklist::BlocklistPersistence;
pub use settings::SettingsPersistence;
pub use sudo::SudoPersistence;

use async_trait::async_trait;

use crate::model::StorageMode;

/// Unified persistence service trait
///
/// This is the main interface for all storage operations. One
/// implementation is selected at process start and injected everywhere.
#[async_trait]
pub trait PersistenceService:
    SettingsPersistence + SudoPersistence + BlocklistPersistence + Send + Sync
{
    /// Get the current storage mode
    fn storage_mode(&self) -> StorageMode;

    /// Ensure the three state tables exist
    ///
    /// Additive and idempotent: a no-op when the tables are already
    /// present, never fails on re-run.
    async fn schema_init(&self) -> anyhow::Result<()>;

    /// Health check for the storage backend
    async fn health_check(&self) -> anyhow::Result<()>;
}
