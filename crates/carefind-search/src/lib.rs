//! Location and facility search engine.
//!
//! [`HybridSearch`] merges the static [`Gazetteer`], the caller's facility
//! snapshot ([`FacilityIndex`]) and a remote [`PlaceResolver`] into one
//! ranked suggestion list. [`QueryScheduler`] debounces keystroke bursts in
//! front of it, and [`NearbyFilter`] applies distance-based filtering once a
//! location has been committed.

pub mod error;
pub mod facility_index;
pub mod gazetteer;
pub mod hybrid;
pub mod nearby;
mod query;
pub mod resolver;
pub mod scheduler;

pub use error::SearchError;
pub use facility_index::FacilityIndex;
pub use gazetteer::Gazetteer;
pub use hybrid::HybridSearch;
pub use nearby::{NearbyFilter, NearbySort};
pub use query::MIN_QUERY_CHARS;
pub use resolver::PlaceResolver;
pub use scheduler::{Delivery, QueryScheduler, SearchRequest, SuggestionSource};
