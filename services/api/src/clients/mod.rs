//! Thin clients for the third-party HTTP APIs

use thiserror::Error;

pub mod email;
pub mod news;
pub mod script;

// Re-export for convenience
pub use email::EmailClient;
pub use news::NewsClient;
pub use script::ScriptClient;

/// Failure modes for outbound calls that are surfaced to the caller
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The service could not be reached or answered with an error status
    #[error("Upstream service unreachable: {0}")]
    Unreachable(String),

    /// The service answered but the payload was not usable
    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}
