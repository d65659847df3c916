use canvas_host::HostError;
use completion_api::CompletionApiError;
use thiserror::Error;

/// Session-terminating failure.
///
/// Every variant ends the active session loop; the orchestrator surfaces it
/// on the advisory notification channel with error severity before returning
/// it. The empty selection is deliberately absent: it is recovered locally
/// before a session starts.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Request dispatch or stream consumption failed at the gateway boundary.
    #[error("completion request failed: {0}")]
    Gateway(#[from] CompletionApiError),
    /// A capability call failed at the host boundary.
    #[error("canvas host call failed: {0}")]
    Host(#[from] HostError),
}
