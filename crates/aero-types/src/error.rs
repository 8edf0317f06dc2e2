//! Error types for aero.

use std::io;

/// Errors produced by the aero desktop core.
#[derive(Debug, thiserror::Error)]
pub enum AeroError {
    /// A referenced window or file node does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A structurally unsafe mutation was refused (self-parenting move,
    /// reparenting under a descendant, creating under a non-folder or
    /// trashed parent, ...).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// An internal invariant was violated (e.g. a cycle detected while
    /// walking ancestry). Operations fail closed rather than loop.
    #[error("fault: {0}")]
    Fault(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AeroError>;
