//! Error types for the explorer pipeline.
//!
//! Only two classes of failure abort a page view: the daemon being
//! unreachable (or answering garbage), and the daemon explicitly not
//! recognizing the identifier. Everything else (wrong record kind, a
//! predecessor that fails to resolve) is handled locally by the caller
//! and never becomes an [`ExplorerError`].

use thiserror::Error;

/// Failures that abort a block page view.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The daemon could not be reached, or the connection died mid-exchange.
    #[error("chain daemon unreachable: {0}")]
    Transport(#[from] std::io::Error),

    /// The daemon replied with something that is not JSON.
    #[error("daemon reply is not valid JSON: {0}")]
    BadJson(#[from] serde_json::Error),

    /// The reply parsed as JSON but is not a well-formed query envelope:
    /// the `response` discriminator is missing or carries an unexpected
    /// value, or a "known" answer arrived with no record attached.
    #[error("malformed daemon envelope: {0}")]
    MalformedEnvelope(String),

    /// The daemon does not recognize the identifier. Terminal for the page;
    /// the user sees this message verbatim.
    #[error("incorrect query answer")]
    UnknownIdentifier,
}

impl ExplorerError {
    /// True for failures caused by the transport or a broken envelope,
    /// as opposed to a well-formed negative answer.
    pub fn is_transport_class(&self) -> bool {
        !matches!(self, ExplorerError::UnknownIdentifier)
    }
}
