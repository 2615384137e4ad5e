//! Typed failure variants for Gr4vy API operations.
//!
//! Mirrors the failure taxonomy of the hosted service's official SDKs so
//! that callers can classify outcomes without string-matching on a single
//! opaque error type. The one exception is [`Gr4vyError::Network`], whose
//! message text is part of the contract: downstream display logic matches
//! on host-resolution and timeout phrasing, so the client preserves it
//! verbatim when mapping transport errors.

/// Errors raised by [`Gr4vy`](crate::client::Gr4vy) operations.
#[derive(Debug, thiserror::Error)]
pub enum Gr4vyError {
    /// The configured Gr4vy merchant identifier is empty or malformed.
    #[error("invalid Gr4vy ID: {0}")]
    InvalidGr4vyId(String),

    /// An API URL could not be constructed.
    #[error("bad URL: {url}")]
    BadUrl {
        /// The offending URL text.
        url: String,
    },

    /// The service answered with a non-success status code.
    #[error("HTTP error {status}")]
    Http {
        /// HTTP status code of the response.
        status: u16,
        /// Canonical status message, when one exists.
        message: Option<String>,
        /// Raw response body, when one was returned.
        response_body: Option<String>,
    },

    /// The request never produced an HTTP response.
    #[error("network error: {message}")]
    Network {
        /// Transport-level failure description.
        message: String,
    },

    /// A response body could not be decoded.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// The 3-D Secure authentication flow failed.
    #[error("3DS error: {0}")]
    ThreeDs(String),

    /// No UI context is available to host the 3-D Secure challenge.
    #[error("UI context error: {0}")]
    UiContext(String),

    /// Any failure the service surfaced that has no dedicated variant.
    #[error("{0}")]
    Other(String),
}
