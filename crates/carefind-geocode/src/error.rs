use thiserror::Error;

/// Errors returned by the place-search provider client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider answered but had no usable match.
    #[error("no location found for \"{query}\"")]
    NotFound { query: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GeocodeError {
    /// `true` for transport-level failures: network, timeout, non-2xx, or a
    /// body that isn't the expected JSON.
    #[must_use]
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(
            self,
            GeocodeError::Http(_)
                | GeocodeError::UnexpectedStatus { .. }
                | GeocodeError::Deserialize { .. }
        )
    }
}
