//! Free text to geocoded place suggestions.

use carefind_core::Suggestion;

use crate::client::NominatimClient;

/// Turns free text into `Place` suggestions that already carry coordinates.
///
/// Provider failures are logged and yield an empty list: a missing remote
/// contribution must never sink the wider search.
#[derive(Debug, Clone)]
pub struct RemoteResolver {
    client: NominatimClient,
}

impl RemoteResolver {
    #[must_use]
    pub fn new(client: NominatimClient) -> Self {
        Self { client }
    }

    /// Ask the provider for up to `limit` candidates.
    ///
    /// Hits with unusable coordinates are skipped.
    pub async fn resolve(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        match self.client.search(query, limit).await {
            Ok(places) => places
                .iter()
                .filter_map(|place| {
                    let coordinates = place.coordinates()?;
                    Some(Suggestion::resolved_place(
                        place.short_name(),
                        place.display_name.clone(),
                        coordinates,
                    ))
                })
                .take(limit)
                .collect(),
            Err(e) => {
                tracing::warn!(
                    query,
                    source = "nominatim",
                    error = %e,
                    "remote place search failed; continuing without it"
                );
                Vec::new()
            }
        }
    }
}
