//! Error type shared by the chain and table layers.

/// Errors returned by lookups and mutations keyed by uid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// No reachable player carries the given uid.
    #[error("key '{0}' not found")]
    KeyNotFound(String),
}

impl MapError {
    pub(crate) fn not_found(key: &str) -> Self {
        MapError::KeyNotFound(key.to_string())
    }
}
