//! HTTP client for an Overpass-compatible map-data endpoint.

use std::time::Duration;

use carefind_core::{AppConfig, Coordinates, FacilityRecord};
use reqwest::{Client, Url};

use crate::error::FacilityError;
use crate::parse::parse_elements;
use crate::query::build_hospital_query;
use crate::retry::retry_with_backoff;
use crate::types::OverpassResponse;

const DEFAULT_INTERPRETER_URL: &str = "https://overpass-api.de/api/interpreter";

/// Client for hospital lookups around a coordinate.
///
/// Transient errors (timeouts, connect failures, 429, 5xx) are retried with
/// exponential back-off up to `max_retries` additional attempts. The request
/// timeout is a hard upper bound per attempt.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    interpreter_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl OverpassClient {
    /// Creates a client pointed at the public Overpass interpreter.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, FacilityError> {
        Self::with_base_url(
            DEFAULT_INTERPRETER_URL,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
        )
    }

    /// Creates a client from the endpoint, timeout, retry, and user-agent
    /// settings in `config`.
    ///
    /// # Errors
    ///
    /// Same as [`OverpassClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FacilityError> {
        Self::with_base_url(
            &config.overpass_url,
            config.facility_timeout_secs,
            &config.user_agent,
            config.facility_max_retries,
            config.facility_backoff_base_ms,
        )
    }

    /// Creates a client for a custom interpreter URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FacilityError::InvalidBaseUrl`] if
    /// `interpreter_url` does not parse.
    pub fn with_base_url(
        interpreter_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, FacilityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        let interpreter_url =
            Url::parse(interpreter_url).map_err(|e| FacilityError::InvalidBaseUrl {
                url: interpreter_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            interpreter_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches named hospitals within `radius_m` meters of `center`, nearest first.
    ///
    /// # Errors
    ///
    /// - [`FacilityError::InvalidInput`] for an invalid center or a
    ///   non-positive radius.
    /// - [`FacilityError::Http`] / [`FacilityError::UnexpectedStatus`] after
    ///   retries are exhausted.
    /// - [`FacilityError::Deserialize`] if the body is not Overpass JSON.
    pub async fn fetch_hospitals(
        &self,
        center: Coordinates,
        radius_m: f64,
    ) -> Result<Vec<FacilityRecord>, FacilityError> {
        if !center.is_valid() {
            return Err(FacilityError::InvalidInput(format!(
                "center ({}, {}) is not a valid coordinate",
                center.lat, center.lon
            )));
        }
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(FacilityError::InvalidInput(format!(
                "radius must be a positive number of meters, got {radius_m}"
            )));
        }

        let query = build_hospital_query(center, radius_m);
        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.post_query(&query)
        })
        .await?;

        let records = parse_elements(&response.elements, center);
        tracing::debug!(
            lat = center.lat,
            lon = center.lon,
            radius_m,
            elements = response.elements.len(),
            kept = records.len(),
            "facility area fetch complete"
        );
        Ok(records)
    }

    async fn post_query(&self, query: &str) -> Result<OverpassResponse, FacilityError> {
        let response = self
            .client
            .post(self.interpreter_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("data", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FacilityError::UnexpectedStatus {
                status: response.status().as_u16(),
                url: self.interpreter_url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FacilityError::Deserialize {
            context: self.interpreter_url.to_string(),
            source: e,
        })
    }
}
