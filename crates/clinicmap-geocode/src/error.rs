use thiserror::Error;

/// Errors from a single provider lookup.
///
/// These never escape [`crate::GeocodeResolver::resolve`]; the resolver
/// logs them and records `None` for the affected address.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The credential was rejected (HTTP 401/403).
    #[error("geocoding credential rejected (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("rate limited by geocoding provider")]
    RateLimited,

    #[error("unexpected HTTP status {status} geocoding \"{address}\"")]
    UnexpectedStatus { status: u16, address: String },

    #[error("invalid geocoder base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("geocoding request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u128 },
}
