//! Idempotent storage initialization
//!
//! Ensures the three state tables exist, seeds missing default settings,
//! and reconciles the external owner seed list on the embedded backend.
//! Safe to call on every startup: table creation is additive, seeding
//! never overwrites an operator-modified value, and reconciliation never
//! removes an owner that is absent from the seed.

use cassava_common::trim_number;
use cassava_persistence::defaults::DEFAULT_SETTINGS;
use cassava_persistence::{PersistenceService, StorageMode};
use tracing::{error, info};

/// Run initialization, reporting failures without raising
///
/// A failure here is logged and swallowed so a flaky database cannot
/// prevent the application from starting; the next call picks up where
/// this one left off.
pub(crate) async fn run(persistence: &dyn PersistenceService, owner_seed: &[String]) {
    if let Err(e) = try_initialize(persistence, owner_seed).await {
        error!("State store initialization failed: {:#}", e);
    }
}

async fn try_initialize(
    persistence: &dyn PersistenceService,
    owner_seed: &[String],
) -> anyhow::Result<()> {
    persistence.schema_init().await?;

    // Seed defaults only where absent; an operator-modified value is
    // never clobbered by re-initialization.
    for (key, value) in DEFAULT_SETTINGS {
        persistence.setting_seed_default(key, value).await?;
    }

    // Owner reconciliation runs only on the embedded backend; external-DB
    // deployments manage owners through runtime commands. Runs on every
    // initialization so numbers added to the seed later are picked up,
    // and never removes owners that are absent from the seed.
    if persistence.storage_mode() == StorageMode::Embedded && !owner_seed.is_empty() {
        let mut synced = 0usize;
        for number in owner_seed {
            let number = trim_number(number);
            if number.is_empty() {
                continue;
            }
            persistence.sudo_insert(number).await?;
            synced += 1;
        }
        info!(count = synced, "Synced owner seed list into sudo owners");
    }

    info!(mode = %persistence.storage_mode(), "State store initialized");
    Ok(())
}
