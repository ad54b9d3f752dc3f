//! Configuration management for Cassava
//!
//! This module handles loading and accessing application configuration.
//! Sources, lowest precedence first: the optional `conf/cassava.yml` file,
//! `CASSAVA`-prefixed environment variables, and the conventional
//! `DATABASE_URL` variable as a final override for `db.url`.

use std::time::Duration;

use ::config::{Config, Environment, File};

use cassava_common::CassavaError;
use cassava_persistence::StorageMode;
use cassava_persistence::sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> Self {
        let mut config_builder = Config::builder()
            .add_source(File::with_name("conf/cassava").required(false))
            .add_source(
                Environment::with_prefix("cassava")
                    .separator(".")
                    .try_parsing(true),
            );

        // Hosting platforms conventionally inject DATABASE_URL; its
        // presence is also what flips the store onto the external backend.
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config_builder = config_builder
                .set_override("db.url", url)
                .expect("Failed to set database URL override");
        }

        let app_config = config_builder
            .build()
            .expect("Failed to build configuration");

        Configuration { config: app_config }
    }

    /// Wrap an already-built `Config` (useful for tests)
    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Storage Configuration
    // ========================================================================

    pub fn database_url(&self) -> Option<String> {
        self.config.get_string("db.url").ok()
    }

    /// Which backend this process runs against
    ///
    /// Read once at startup and immutable for the process lifetime. An
    /// explicit `storage.mode` wins; otherwise a configured database URL
    /// selects the external backend and its absence the embedded one.
    pub fn storage_mode(&self) -> StorageMode {
        if let Ok(mode) = self.config.get_string("storage.mode")
            && let Ok(mode) = mode.parse()
        {
            return mode;
        }

        if self.database_url().is_some() {
            StorageMode::ExternalDb
        } else {
            StorageMode::Embedded
        }
    }

    /// Directory for the embedded RocksDB backend
    pub fn embedded_data_dir(&self) -> String {
        self.config
            .get_string("storage.data.dir")
            .unwrap_or("data/state".to_string())
    }

    /// The external operator seed list, reconciled at initialization
    ///
    /// Accepts a YAML list or a comma-separated string; entries are
    /// trimmed by the initializer, not here.
    pub fn owner_seed(&self) -> Vec<String> {
        if let Ok(values) = self.config.get_array("owners") {
            return values
                .into_iter()
                .filter_map(|v| v.into_string().ok())
                .collect();
        }

        self.config
            .get_string("owners")
            .map(|s| s.split(',').map(str::to_string).collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // Database Connection
    // ========================================================================

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let max_connections = self
            .config
            .get_int("db.pool.max_connections")
            .unwrap_or(10) as u32;
        let min_connections = self.config.get_int("db.pool.min_connections").unwrap_or(1) as u32;
        let connect_timeout = self.config.get_int("db.pool.connect_timeout").unwrap_or(30) as u64;
        let acquire_timeout = self.config.get_int("db.pool.acquire_timeout").unwrap_or(8) as u64;
        let idle_timeout = self.config.get_int("db.pool.idle_timeout").unwrap_or(10) as u64;
        let max_lifetime = self.config.get_int("db.pool.max_lifetime").unwrap_or(1800) as u64;
        let sqlx_logging = self
            .config
            .get_bool("db.pool.sqlx_logging")
            .unwrap_or(false);

        let url = self
            .config
            .get_string("db.url")
            .map_err(|_| CassavaError::ConfigError("db.url is not set".to_string()))?;

        let mut opt = ConnectOptions::new(url);

        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(connect_timeout))
            .acquire_timeout(Duration::from_secs(acquire_timeout))
            .idle_timeout(Duration::from_secs(idle_timeout))
            .max_lifetime(Duration::from_secs(max_lifetime))
            .sqlx_logging(sqlx_logging);

        tracing::info!(
            max_connections = max_connections,
            min_connections = min_connections,
            connect_timeout = connect_timeout,
            idle_timeout = idle_timeout,
            max_lifetime = max_lifetime,
            sqlx_logging = sqlx_logging,
            "Database connection pool configured"
        );

        let database_connection: DatabaseConnection = Database::connect(opt).await?;

        Ok(database_connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration_with(pairs: &[(&str, &str)]) -> Configuration {
        let mut builder = Config::builder();
        for (key, value) in pairs {
            builder = builder.set_override(*key, *value).unwrap();
        }
        Configuration::from_config(builder.build().unwrap())
    }

    #[test]
    fn test_storage_mode_defaults_to_embedded() {
        let configuration = configuration_with(&[]);
        assert_eq!(configuration.storage_mode(), StorageMode::Embedded);
    }

    #[test]
    fn test_storage_mode_follows_database_url() {
        let configuration = configuration_with(&[("db.url", "postgres://localhost/cassava")]);
        assert_eq!(configuration.storage_mode(), StorageMode::ExternalDb);
    }

    #[test]
    fn test_storage_mode_explicit_override_wins() {
        let configuration = configuration_with(&[
            ("db.url", "postgres://localhost/cassava"),
            ("storage.mode", "embedded"),
        ]);
        assert_eq!(configuration.storage_mode(), StorageMode::Embedded);
    }

    #[test]
    fn test_owner_seed_from_comma_separated_string() {
        let configuration = configuration_with(&[("owners", "123, 456 ,123")]);
        assert_eq!(
            configuration.owner_seed(),
            vec!["123".to_string(), " 456 ".to_string(), "123".to_string()]
        );
    }

    #[test]
    fn test_owner_seed_empty_by_default() {
        let configuration = configuration_with(&[]);
        assert!(configuration.owner_seed().is_empty());
    }

    #[test]
    fn test_embedded_data_dir_default() {
        let configuration = configuration_with(&[]);
        assert_eq!(configuration.embedded_data_dir(), "data/state");
    }
}
