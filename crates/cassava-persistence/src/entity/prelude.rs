//! Re-exports of entity types under their table names

pub use super::badwords::Entity as Badwords;
pub use super::bot_settings::Entity as BotSettings;
pub use super::sudo_owners::Entity as SudoOwners;
