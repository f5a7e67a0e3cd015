//! Error types for the Browse client

use thiserror::Error;

/// Errors that can occur during a ContentDirectory Browse call
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Network or HTTP transport error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The SOAP response did not contain the expected Result payload;
    /// carries an excerpt of the body for diagnosis
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// UPnP fault returned by the server
    #[error("UPnP fault: error code {0}")]
    Fault(u16),

    /// The extracted DIDL-Lite payload failed to parse
    #[error(transparent)]
    Parse(#[from] didl_parser::ParseError),
}
