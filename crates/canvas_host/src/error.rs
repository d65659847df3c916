use thiserror::Error;

/// Failure crossing the host capability boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host side of the channel is gone.
    #[error("host channel disconnected")]
    Disconnected,
    /// The required style resource could not be loaded; no fallback styling
    /// is applied.
    #[error("style resource failed to load: {0}")]
    StyleLoad(String),
    /// The host answered a command with the wrong reply variant.
    #[error("host protocol mismatch: {0}")]
    Protocol(String),
    /// The host rejected or failed the operation.
    #[error("host operation failed: {0}")]
    Backend(String),
}
