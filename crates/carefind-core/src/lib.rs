pub mod app_config;
pub mod config;
pub mod datasets;
pub mod error;
pub mod geo;
pub mod logging;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use datasets::{
    load_fallback_facilities, load_places, parse_fallback_facilities, parse_places,
    FacilitiesFile, PlacesFile,
};
pub use error::ConfigError;
pub use geo::{distance, distance_meters, EARTH_RADIUS_METERS};
pub use types::{
    Confidence, Coordinates, FacilityRecord, GeocodeResult, PlaceRecord, Suggestion,
    SuggestionKind,
};
