use thiserror::Error;

/// Errors returned by the order-interpretation client.
#[derive(Debug, Error)]
pub enum InterpretError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion service answered with a non-success HTTP status.
    #[error("completion service returned status {status}: {message}")]
    ServiceStatus { status: u16, message: String },

    /// HTTP 429 with the service's `insufficient_quota` marker. Retrying
    /// cannot help until the account is topped up, so this is kept apart
    /// from ordinary rate-limit 429s.
    #[error("completion service quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The service answered 2xx but the payload had no recoverable item
    /// structure. Partially valid payloads do NOT produce this error — they
    /// yield a result with the valid subset and explanatory notes.
    #[error("malformed completion response for {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    /// Client construction failed (bad base URL or HTTP client build).
    #[error("invalid interpreter configuration: {0}")]
    Configuration(String),
}
