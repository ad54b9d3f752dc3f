//! SQL-based persistence backend (MySQL/PostgreSQL via SeaORM)
//!
//! This module implements the `PersistenceService` trait on top of a SeaORM
//! `DatabaseConnection`. Each operation borrows a pooled connection for its
//! own duration only; nothing is held across calls.

use async_trait::async_trait;
use sea_orm::{prelude::Expr, sea_query::OnConflict, *};

use crate::entity::{badwords, bot_settings, sudo_owners};
use crate::model::{Setting, StorageMode};
use crate::traits::*;

/// External database persistence service
///
/// Wraps a SeaORM `DatabaseConnection` and implements all persistence
/// traits by delegating to direct database queries.
pub struct ExternalDbPersistService {
    db: DatabaseConnection,
}

impl ExternalDbPersistService {
    /// Create a new ExternalDbPersistService with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get a reference to the underlying database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Execute `CREATE TABLE IF NOT EXISTS` for one entity
    async fn create_table_if_missing<E>(&self, entity: E) -> anyhow::Result<()>
    where
        E: EntityTrait,
    {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);
        let mut statement = schema.create_table_from_entity(entity);
        statement.if_not_exists();
        self.db.execute(backend.build(&statement)).await?;
        Ok(())
    }
}

// ============================================================================
// PersistenceService implementation
// ============================================================================

#[async_trait]
impl PersistenceService for ExternalDbPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::ExternalDb
    }

    async fn schema_init(&self) -> anyhow::Result<()> {
        self.create_table_if_missing(bot_settings::Entity).await?;
        self.create_table_if_missing(sudo_owners::Entity).await?;
        self.create_table_if_missing(badwords::Entity).await?;
        Ok(())
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        // Execute a simple query to verify connectivity
        bot_settings::Entity::find()
            .select_only()
            .column_as(Expr::cust("1"), "health")
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;
        Ok(())
    }
}

// ============================================================================
// SettingsPersistence implementation
// ============================================================================

#[async_trait]
impl SettingsPersistence for ExternalDbPersistService {
    async fn settings_find_all(&self) -> anyhow::Result<Vec<Setting>> {
        let rows = bot_settings::Entity::find().all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|m| Setting {
                key: m.key,
                value: m.value,
            })
            .collect())
    }

    async fn setting_upsert(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let entity = bot_settings::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            ..Default::default()
        };

        bot_settings::Entity::insert(entity)
            .on_conflict(
                OnConflict::column(bot_settings::Column::Key)
                    .update_column(bot_settings::Column::Value)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn setting_seed_default(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let entity = bot_settings::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            ..Default::default()
        };

        bot_settings::Entity::insert(entity)
            .on_conflict(
                OnConflict::column(bot_settings::Column::Key)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }
}

// ============================================================================
// SudoPersistence implementation
// ============================================================================

#[async_trait]
impl SudoPersistence for ExternalDbPersistService {
    async fn sudo_insert(&self, number: &str) -> anyhow::Result<()> {
        let entity = sudo_owners::ActiveModel {
            number: Set(number.to_string()),
            ..Default::default()
        };

        sudo_owners::Entity::insert(entity)
            .on_conflict(
                OnConflict::column(sudo_owners::Column::Number)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn sudo_delete(&self, number: &str) -> anyhow::Result<()> {
        sudo_owners::Entity::delete_many()
            .filter(sudo_owners::Column::Number.eq(number))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn sudo_find_all(&self) -> anyhow::Result<Vec<String>> {
        let numbers = sudo_owners::Entity::find()
            .select_only()
            .column(sudo_owners::Column::Number)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(numbers)
    }

    async fn sudo_exists(&self, number: &str) -> anyhow::Result<bool> {
        let result = sudo_owners::Entity::find()
            .select_only()
            .column_as(Expr::cust("1"), "exists_flag")
            .filter(sudo_owners::Column::Number.eq(number))
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;

        Ok(result.is_some())
    }
}

// ============================================================================
// BlocklistPersistence implementation
// ============================================================================

#[async_trait]
impl BlocklistPersistence for ExternalDbPersistService {
    async fn badword_insert(&self, word: &str) -> anyhow::Result<()> {
        let entity = badwords::ActiveModel {
            word: Set(word.to_string()),
            ..Default::default()
        };

        badwords::Entity::insert(entity)
            .on_conflict(
                OnConflict::column(badwords::Column::Word)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn badword_delete(&self, word: &str) -> anyhow::Result<()> {
        badwords::Entity::delete_many()
            .filter(badwords::Column::Word.eq(word))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn badword_find_all(&self) -> anyhow::Result<Vec<String>> {
        let words = badwords::Entity::find()
            .select_only()
            .column(badwords::Column::Word)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(words)
    }
}
