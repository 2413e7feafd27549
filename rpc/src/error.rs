//! RPC error types.

use thiserror::Error;

/// Failure of one node call.
///
/// `Clone` so that a fetch failure can be both logged and surfaced through
/// a pagination session without losing detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("node returned HTTP {0}")]
    Http(u16),

    #[error("node error: {0}")]
    Node(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("empty response")]
    EmptyResponse,
}
