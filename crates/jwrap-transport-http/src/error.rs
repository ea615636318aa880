//! Error types for the HTTP transport layer.

use thiserror::Error;

/// Errors that can occur in the HTTP transport.
#[derive(Debug, Error)]
pub enum HttpTransportError {
    /// The configured host and port do not form a socket address.
    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        /// The address string.
        addr: String,
        /// The parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The endpoint path is not an absolute route.
    #[error("endpoint path must start with '/', got '{0}'")]
    InvalidPath(String),
    /// The endpoint path is taken by a health probe.
    #[error("endpoint path '{0}' is reserved for health probes")]
    ReservedPath(String),
    /// Failed to bind to the TCP address.
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        /// The address string.
        addr: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server encountered an I/O error while serving.
    #[error("server error: {0}")]
    Serve(String),
}
