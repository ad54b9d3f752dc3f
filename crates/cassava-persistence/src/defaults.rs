//! The compiled-in default settings table
//!
//! The canonical set of recognized setting keys and their defaults. Every
//! recognized key always resolves to some effective value: either a stored
//! row or the default listed here. Defaults seed the store at
//! initialization, they never overwrite an operator-modified value.

use std::collections::HashMap;

/// Recognized setting keys with their default values
pub const DEFAULT_SETTINGS: &[(&str, &str)] = &[
    ("antilink", "on"),
    ("antilinkall", "off"),
    ("autobio", "on"),
    ("antidelete", "on"),
    ("antitag", "on"),
    ("antibot", "off"),
    ("anticall", "off"),
    ("antistatusmention", "off"),
    ("antiforeign", "off"),
    ("badword", "off"),
    ("gptdm", "off"),
    ("welcomegoodbye", "off"),
    ("autoread", "off"),
    ("mode", "public"),
    ("prefix", "."),
    ("autolike", "on"),
    ("autoview", "on"),
    ("wapresence", "online"),
    ("antiedit", "private"),
    ("menuTitle", "Cassava Bot"),
    ("antigroupmention", "off"),
];

/// Build the default settings mapping
///
/// Returns a fresh owned map so callers can overlay persisted values on it.
pub fn default_settings() -> HashMap<String, String> {
    DEFAULT_SETTINGS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
