//! Facility-area loading.
//!
//! Fetches hospitals around a coordinate from an Overpass-compatible
//! map-data provider and, when the live source yields nothing, falls back to
//! an injected static table.

pub mod client;
pub mod error;
pub mod fallback;
pub mod loader;
pub mod parse;
pub mod query;
mod retry;
pub mod types;

pub use client::OverpassClient;
pub use error::FacilityError;
pub use fallback::FallbackTable;
pub use loader::{AreaLoad, FacilityAreaLoader, FacilitySource};
pub use parse::parse_elements;
pub use query::build_hospital_query;
pub use types::{OverpassCenter, OverpassElement, OverpassResponse};
