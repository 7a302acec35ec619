//! Client for a Nominatim-compatible place-search provider.
//!
//! [`NominatimClient`] performs the raw request. [`RemoteResolver`] turns
//! free text into place suggestions and absorbs provider failures;
//! [`GeocodeClient`] resolves one committed choice and surfaces them.

pub mod client;
pub mod error;
pub mod geocoder;
pub mod resolver;
pub mod types;

pub use client::NominatimClient;
pub use error::GeocodeError;
pub use geocoder::GeocodeClient;
pub use resolver::RemoteResolver;
pub use types::NominatimPlace;
