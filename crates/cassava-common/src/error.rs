//! Error types for Cassava
//!
//! `CassavaError` classifies failures for typed reporting; most persistence
//! paths carry errors as `anyhow::Error` and downcast only where the class
//! matters.

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum CassavaError {
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}
