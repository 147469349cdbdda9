//! Error types for the Zinema plugin.
//!
//! This module defines the centralized error type [`ZinemaError`] and a type
//! alias [`Result`] used throughout the plugin. All errors are implemented
//! with the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Zinema plugin operations.
///
/// Consolidates every failure mode the plugin can hit: logical API
/// failures reported by OMDb, transport-level HTTP failures, malformed
/// response bodies, and local configuration or theme problems.
///
/// Transport and logical failures are deliberately kept as separate
/// variants even though the UI displays them identically; logs and traces
/// distinguish them.
#[derive(Debug, Error)]
pub enum ZinemaError {
    /// The upstream API accepted the request but reported a failure.
    ///
    /// For OMDb this is a `Response: "False"` payload; the string is the
    /// `Error` message it carried (e.g. "Movie not found!").
    #[error("{0}")]
    Api(String),

    /// A request failed at the transport level.
    ///
    /// Covers non-success HTTP status codes and unreachable hosts (which
    /// surface as status 0 from the plugin host). The string names the
    /// operation that failed.
    #[error("{context} failed with status {status}")]
    Http {
        /// HTTP status code, 0 when the request never reached a server.
        status: u16,
        /// Short description of the operation (e.g. "movie search").
        context: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Only the observability layer touches the filesystem; everything
    /// else in the plugin is in-memory or over the network.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Zinema operations.
pub type Result<T> = std::result::Result<T, ZinemaError>;
