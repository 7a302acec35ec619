//! HTTP client for a Nominatim-compatible free-text search endpoint.
//!
//! Wraps `reqwest` with a hard request timeout, a descriptive `User-Agent`
//! (required by the public Nominatim usage policy), and typed response
//! deserialization.

use std::time::Duration;

use carefind_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::types::NominatimPlace;

const DEFAULT_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Client for the place-search provider.
///
/// Cheap to clone; clones share the underlying connection pool. Use
/// [`NominatimClient::new`] for production or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    search_url: Url,
}

impl NominatimClient {
    /// Creates a new client pointed at the public Nominatim search endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(DEFAULT_SEARCH_URL, timeout_secs, user_agent)
    }

    /// Creates a client from the endpoint, timeout, and user agent in `config`.
    ///
    /// # Errors
    ///
    /// Same as [`NominatimClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        Self::with_base_url(
            &config.nominatim_url,
            config.geocode_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a new client for a custom search endpoint.
    ///
    /// `search_url` is the full endpoint URL (e.g. `http://127.0.0.1:8080/search`).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `search_url` does not parse.
    pub fn with_base_url(
        search_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        let search_url = Url::parse(search_url).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: search_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, search_url })
    }

    /// Runs a free-text search and returns the provider's hits in order.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or timeout.
    /// - [`GeocodeError::UnexpectedStatus`] on a non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not the expected JSON array.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<NominatimPlace>, GeocodeError> {
        let url = self.build_url(query, limit);
        let body = self.request_text(&url).await?;
        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        tracing::debug!(query, limit, count = places.len(), "place search complete");
        Ok(places)
    }

    /// Builds the search URL with percent-encoded query parameters.
    fn build_url(&self, query: &str, limit: usize) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string())
            .append_pair("addressdetails", "1");
        url
    }

    async fn request_text(&self, url: &Url) -> Result<String, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
