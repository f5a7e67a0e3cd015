//! Error types for DIDL-Lite parsing

use thiserror::Error;

/// Errors that can occur while parsing DIDL-Lite payloads
#[derive(Error, Debug)]
pub enum ParseError {
    /// XML deserialization failed; carries the text that failed to parse
    /// so the payload can be inspected
    #[error("XML deserialization failed: {message}; content: {content}")]
    XmlDeserializationFailed { message: String, content: String },
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
