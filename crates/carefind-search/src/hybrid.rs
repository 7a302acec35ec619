//! Multi-source merge and rank.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use carefind_core::{FacilityRecord, Suggestion};

use crate::error::SearchError;
use crate::facility_index::FacilityIndex;
use crate::gazetteer::Gazetteer;
use crate::query::normalize;
use crate::resolver::PlaceResolver;
use crate::scheduler::{SearchRequest, SuggestionSource};

/// Blends the facility snapshot, the gazetteer, and a remote resolver.
///
/// Each source gets `ceil(limit / 3)` slots and all three run concurrently.
/// Results are merged facilities first, then gazetteer places, then remote
/// places; the first occurrence of each case-insensitive `(name, kind)` wins
/// and the list is cut to `limit`.
#[derive(Debug)]
pub struct HybridSearch<R> {
    gazetteer: Arc<Gazetteer>,
    resolver: R,
}

impl<R: PlaceResolver> HybridSearch<R> {
    #[must_use]
    pub fn new(gazetteer: Arc<Gazetteer>, resolver: R) -> Self {
        Self {
            gazetteer,
            resolver,
        }
    }

    /// # Errors
    ///
    /// Returns [`SearchError::InvalidInput`] when `limit` is zero. Source
    /// failures never surface here.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        facilities: &[FacilityRecord],
    ) -> Result<Vec<Suggestion>, SearchError> {
        if limit == 0 {
            return Err(SearchError::InvalidInput(
                "suggestion limit must be greater than zero".to_string(),
            ));
        }
        if normalize(query).is_none() {
            return Ok(Vec::new());
        }

        let share = limit.div_ceil(3);
        let query = query.trim();
        let (facility_hits, place_hits, remote_hits) = tokio::join!(
            async { FacilityIndex::search(query, facilities, share) },
            async { self.gazetteer.lookup(query, share) },
            self.resolver.resolve(query, share),
        );

        tracing::debug!(
            query,
            limit,
            facilities = facility_hits.len(),
            places = place_hits.len(),
            remote = remote_hits.len(),
            "hybrid search sources complete"
        );

        Ok(merge_suggestions(
            limit,
            [facility_hits, place_hits, remote_hits],
        ))
    }
}

impl<R: PlaceResolver + 'static> SuggestionSource for HybridSearch<R> {
    fn suggest(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<Vec<Suggestion>, SearchError>> + Send {
        self.search(&request.query, request.limit, &request.facilities)
    }
}

/// Concatenate `sources` in order, drop repeated `(name, kind)` keys, and
/// stop at `limit`.
pub(crate) fn merge_suggestions(
    limit: usize,
    sources: impl IntoIterator<Item = Vec<Suggestion>>,
) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(limit);
    for suggestion in sources.into_iter().flatten() {
        if merged.len() == limit {
            break;
        }
        if seen.insert(suggestion.dedup_key()) {
            merged.push(suggestion);
        }
    }
    merged
}
