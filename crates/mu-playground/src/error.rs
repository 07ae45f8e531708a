//! Error types for the playground core.

use thiserror::Error;

/// Fatal failure of the runtime module's one-time initialization.
///
/// There is no recovery path. The host is expected to render a persistent
/// blocking error instead of leaving the page blank.
#[derive(Debug, Clone, Error)]
#[error("runtime initialization failed: {0}")]
pub struct BootstrapError(pub String);

/// Errors surfaced across the session's host boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The host selected an output mode the runtime does not know.
    #[error("unknown output mode '{0}', expected concrete, abstract or debug")]
    UnknownMode(String),
}

/// Transport-level failure while fetching a snippet.
///
/// Never shown raw: the loader downgrades it to a comment-prefixed
/// diagnostic that becomes the editor content.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be issued or produced no response.
    #[error("request failed: {0}")]
    Request(String),
    /// The response arrived but its body could not be read.
    #[error("could not read response body: {0}")]
    Body(String),
}
