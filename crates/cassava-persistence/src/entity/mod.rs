//! `SeaORM` entity definitions for the three state tables

pub mod prelude;

pub mod badwords;
pub mod bot_settings;
pub mod sudo_owners;
