//! Cassava Persistence - Database entities and persistence layer
//!
//! This crate provides:
//! - SeaORM entity definitions for the three state tables
//! - Persistence trait abstractions for unified storage
//! - The external-DB (MySQL/PostgreSQL) and embedded (RocksDB) backends
//! - The compiled-in default settings table

pub mod defaults;
pub mod embedded;
pub mod entity;
pub mod model;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;

// Re-export persistence traits
pub use traits::{
    BlocklistPersistence, PersistenceService, SettingsPersistence, SudoPersistence,
};

// Re-export SQL backend
pub use sql::ExternalDbPersistService;

// Re-export embedded backend
pub use embedded::EmbeddedPersistService;

// Re-export model types and defaults
pub use defaults::{DEFAULT_SETTINGS, default_settings};
pub use model::{Setting, StorageMode};
