//! Error types for the discovery system.

use std::fmt;

/// Error type for discovery operations.
///
/// A read timeout during SSDP response collection is not represented here:
/// it is the normal end of collection, with or without responses.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Network-related errors (socket creation, datagram send, HTTP requests)
    NetworkError(String),
    /// Malformed device description XML
    ParseError(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DiscoveryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
