//! Error types for Scorepad

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScorepadError>;

#[derive(Error, Debug)]
pub enum ScorepadError {
    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Misuse of a [`crate::store::StateStore`].
///
/// Reading before the first write is a programming error: every controller
/// establishes an initial state in its constructor, so this should be
/// unreachable outside development.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("state was read before being initialized")]
    Uninitialized,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database operation failed: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to decode stored value: {0}")]
    DecodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failure of an external collaborator (repository or navigation).
///
/// These are swallowed by controller supervision: logged, forwarded on the
/// error channel, and never surfaced to the user. Clone-able so they can
/// travel through a broadcast channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Repository call failed: {0}")]
    Repository(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),
}
