//! Cassava Store - the caller-facing state store
//!
//! This crate provides:
//! - `Configuration`: environment/file configuration and backend selection
//! - `bootstrap::connect`: the one-time persistence backend construction
//! - `StateStore`: the settings, sudo-owner, and blocklist facades with
//!   their fail-open/fail-closed policies, plus the idempotent initializer
//! - `logging::init_logging`: tracing setup for the host process

pub mod blocklist;
pub mod bootstrap;
pub mod config;
mod init;
pub mod logging;
pub mod settings;
pub mod sudo;

use std::sync::Arc;

use cassava_persistence::{PersistenceService, StorageMode};

pub use blocklist::BlocklistStore;
pub use crate::config::Configuration;
pub use logging::{LoggingConfig, LoggingGuard, init_logging};
pub use settings::SettingsStore;
pub use sudo::SudoOwnerStore;

/// The bot's persistent state, backed by one storage backend
///
/// Owns the process-wide persistence handle and exposes the three store
/// facades. Construct once at startup, call [`StateStore::initialize`]
/// once, then share freely (cloning is cheap).
#[derive(Clone)]
pub struct StateStore {
    persistence: Arc<dyn PersistenceService>,
    settings: SettingsStore,
    sudo_owners: SudoOwnerStore,
    blocklist: BlocklistStore,
    owner_seed: Vec<String>,
}

impl StateStore {
    /// Build a state store from configuration, selecting the backend once
    pub async fn from_configuration(configuration: &Configuration) -> anyhow::Result<Self> {
        let persistence = bootstrap::connect(configuration).await?;
        Ok(Self::new(persistence, configuration.owner_seed()))
    }

    /// Build a state store over an already-constructed backend
    ///
    /// `owner_seed` is the external list of operator numbers reconciled at
    /// initialization (embedded backend only).
    pub fn new(persistence: Arc<dyn PersistenceService>, owner_seed: Vec<String>) -> Self {
        Self {
            settings: SettingsStore::new(persistence.clone()),
            sudo_owners: SudoOwnerStore::new(persistence.clone()),
            blocklist: BlocklistStore::new(persistence.clone()),
            persistence,
            owner_seed,
        }
    }

    /// Initialize the backing storage
    ///
    /// Idempotent across repeated calls and process restarts. Errors are
    /// logged, never raised, so a flaky database cannot prevent the bot
    /// from starting.
    pub async fn initialize(&self) {
        init::run(self.persistence.as_ref(), &self.owner_seed).await;
    }

    /// Bot settings (fail-open to compiled-in defaults)
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Privileged operators (fail-closed)
    pub fn sudo_owners(&self) -> &SudoOwnerStore {
        &self.sudo_owners
    }

    /// Moderation word-blocklist (fail-closed)
    pub fn blocklist(&self) -> &BlocklistStore {
        &self.blocklist
    }

    /// The storage mode selected at startup
    pub fn storage_mode(&self) -> StorageMode {
        self.persistence.storage_mode()
    }

    /// Health check for the active backend
    pub async fn health_check(&self) -> anyhow::Result<()> {
        self.persistence.health_check().await
    }
}
