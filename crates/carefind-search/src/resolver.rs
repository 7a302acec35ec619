//! Seam between the merge engine and remote place providers.

use std::future::Future;

use carefind_core::Suggestion;
use carefind_geocode::RemoteResolver;

/// A remote source of geocoded place suggestions.
///
/// Implementations absorb their own failures: an unreachable provider
/// yields an empty list, never an error.
pub trait PlaceResolver: Send + Sync {
    fn resolve(&self, query: &str, limit: usize) -> impl Future<Output = Vec<Suggestion>> + Send;
}

impl PlaceResolver for RemoteResolver {
    fn resolve(&self, query: &str, limit: usize) -> impl Future<Output = Vec<Suggestion>> + Send {
        RemoteResolver::resolve(self, query, limit)
    }
}
