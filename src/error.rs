//! Error types for the fuzzylookup crate.
//!
//! Searching never fails; only building an engine from an invalid
//! configuration does.

/// Errors that can occur while constructing a lookup engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Invalid engine configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for fuzzylookup results.
pub type Result<T> = std::result::Result<T, EngineError>;
