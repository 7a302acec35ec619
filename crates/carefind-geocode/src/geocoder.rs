//! Resolve one committed location to coordinates.

use carefind_core::GeocodeResult;

use crate::client::NominatimClient;
use crate::error::GeocodeError;

/// Resolves a single place name with one request for the best match.
///
/// Unlike [`crate::RemoteResolver`], failures are surfaced: at commit time a
/// silent fallback would produce a wrong location.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: NominatimClient,
}

impl GeocodeClient {
    #[must_use]
    pub fn new(client: NominatimClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// - [`GeocodeError::InvalidInput`] for a blank `place_name`.
    /// - [`GeocodeError::NotFound`] when the provider has no usable match.
    /// - Transport variants (see [`GeocodeError::is_remote_unavailable`]).
    pub async fn resolve(&self, place_name: &str) -> Result<GeocodeResult, GeocodeError> {
        let query = place_name.trim();
        if query.is_empty() {
            return Err(GeocodeError::InvalidInput(
                "place name must be non-empty".to_string(),
            ));
        }

        let places = self.client.search(query, 1).await?;
        let best = places
            .iter()
            .find_map(|place| place.coordinates().map(|c| (place, c)));

        match best {
            Some((place, coordinates)) => Ok(GeocodeResult {
                latitude: coordinates.lat,
                longitude: coordinates.lon,
                display_name: place.display_name.clone(),
            }),
            None => {
                tracing::info!(query, "geocode returned no usable result");
                Err(GeocodeError::NotFound {
                    query: query.to_string(),
                })
            }
        }
    }
}
