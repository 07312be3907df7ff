//! Error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Hetzner DNS API operations.
///
/// Every variant carries an `operation` label (for example `get zone 12345`)
/// naming the call that failed, plus variant-specific context. All variants are
/// serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that the transport
/// retries on its own before giving up:
/// - [`NetworkError`](Self::NetworkError) - network connectivity issues
/// - [`Timeout`](Self::Timeout) - request timed out
/// - [`TransientStatus`](Self::TransientStatus) - HTTP 429 or a retryable 5xx
///
/// HTTP 422 is retried too, but it is only classified as
/// [`UnprocessableEntity`](Self::UnprocessableEntity) once the retries are
/// spent, so that variant itself is terminal.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum HetznerError {
    /// Caller input violates a local invariant. Raised before any request.
    #[error("[{operation}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        /// Operation that rejected the input.
        operation: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The HTTP client could not be constructed.
    #[error("[{operation}] Configuration error: {detail}")]
    Configuration {
        /// Operation that failed.
        operation: String,
        /// Error details.
        detail: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    #[error("[{operation}] Network error: {detail}")]
    NetworkError {
        /// Operation that failed.
        operation: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("[{operation}] Request timeout: {detail}")]
    Timeout {
        /// Operation that failed.
        operation: String,
        /// Error details.
        detail: String,
    },

    /// Failed to serialize a request body.
    #[error("[{operation}] Error serializing JSON body: {detail}")]
    SerializationError {
        /// Operation that failed.
        operation: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The API answered with HTTP 429 or a 5xx status worth retrying.
    #[error("[{operation}] API returned transient HTTP {status}: {detail}")]
    TransientStatus {
        /// Operation that failed.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        detail: String,
    },

    /// The retry budget is spent; `last_error` is the final attempt's failure.
    #[error("[{operation}] Giving up after {attempts} attempt(s): {last_error}")]
    RetriesExhausted {
        /// Operation that failed.
        operation: String,
        /// Number of attempts made, first one included.
        attempts: u32,
        /// Failure of the last attempt.
        last_error: Box<HetznerError>,
    },

    /// HTTP 401. The API token is invalid or expired. Never retried.
    #[error(
        "[{operation}] API returned HTTP 401 Unauthorized error with message: '{message}'. Double check your API key is still valid"
    )]
    Unauthorized {
        /// Operation that failed.
        operation: String,
        /// Message from the provider, verbatim.
        message: String,
    },

    /// HTTP 422 that persisted through all retries.
    #[error("[{operation}] API returned HTTP 422 Unprocessable Entity error with message: '{message}'")]
    UnprocessableEntity {
        /// Operation that failed.
        operation: String,
        /// Message from the provider, verbatim.
        message: String,
    },

    /// A status code the operation has no mapping for.
    #[error("[{operation}] HTTP status {status} unhandled")]
    UnhandledStatus {
        /// Operation that failed.
        operation: String,
        /// HTTP status code.
        status: u16,
    },

    /// Failed to parse the API response.
    #[error("[{operation}] Error reading JSON response: {detail}")]
    ParseError {
        /// Operation that failed.
        operation: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// A name lookup found nothing to compare against.
    #[error("[{operation}] No entries returned at all, so nothing can be named '{name}'")]
    EmptyListing {
        /// Operation that failed.
        operation: String,
        /// Name that was looked up.
        name: String,
    },

    /// A name lookup listed entries, but none is named exactly `name`.
    #[error("[{operation}] {listed} entries returned, but none is named exactly '{name}'")]
    NoExactMatch {
        /// Operation that failed.
        operation: String,
        /// Name that was looked up.
        name: String,
        /// Number of entries in the listing.
        listed: usize,
    },

    /// A name lookup that must be unique matched several entries.
    #[error("[{operation}] {matches} entries are named exactly '{name}', expected exactly one")]
    AmbiguousName {
        /// Operation that failed.
        operation: String,
        /// Name that was looked up.
        name: String,
        /// Number of exact matches.
        matches: usize,
    },
}

impl HetznerError {
    /// Label of the operation that produced this error.
    pub fn operation(&self) -> &str {
        match self {
            Self::InvalidParameter { operation, .. }
            | Self::Configuration { operation, .. }
            | Self::NetworkError { operation, .. }
            | Self::Timeout { operation, .. }
            | Self::SerializationError { operation, .. }
            | Self::TransientStatus { operation, .. }
            | Self::RetriesExhausted { operation, .. }
            | Self::Unauthorized { operation, .. }
            | Self::UnprocessableEntity { operation, .. }
            | Self::UnhandledStatus { operation, .. }
            | Self::ParseError { operation, .. }
            | Self::EmptyListing { operation, .. }
            | Self::NoExactMatch { operation, .. }
            | Self::AmbiguousName { operation, .. } => operation,
        }
    }

    /// Whether the transport may retry the attempt that produced this error.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::TransientStatus { .. }
        )
    }

    /// Whether the failure is caused by caller input or remote state rather than
    /// by the client or the network. Used for log levels: `warn` when `true`,
    /// `error` otherwise.
    ///
    /// **Update this when adding a variant.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. }
                | Self::Unauthorized { .. }
                | Self::UnprocessableEntity { .. }
                | Self::EmptyListing { .. }
                | Self::NoExactMatch { .. }
                | Self::AmbiguousName { .. }
        )
    }

    /// Log at `warn` if [`is_expected`](Self::is_expected), at `error` otherwise.
    pub(crate) fn log(&self) {
        if self.is_expected() {
            log::warn!("{self}");
        } else {
            log::error!("{self}");
        }
    }
}

/// Convenience type alias for `Result<T, HetznerError>`.
pub type Result<T> = std::result::Result<T, HetznerError>;
