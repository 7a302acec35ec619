//! YAML datasets loaded once at startup: the gazetteer and the optional
//! fallback facility table.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::types::{FacilityRecord, PlaceRecord};
use crate::ConfigError;

#[derive(Debug, Deserialize)]
pub struct PlacesFile {
    pub places: Vec<PlaceRecord>,
}

#[derive(Debug, Deserialize)]
pub struct FacilitiesFile {
    pub facilities: Vec<FacilityRecord>,
}

/// Load and validate the gazetteer from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_places(path: &Path) -> Result<PlacesFile, ConfigError> {
    let content = read_dataset(path)?;
    parse_places(&content, &path.display().to_string())
}

/// Parse and validate gazetteer YAML. `origin` labels errors.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or an entry is incomplete.
pub fn parse_places(content: &str, origin: &str) -> Result<PlacesFile, ConfigError> {
    let file: PlacesFile =
        serde_yaml::from_str(content).map_err(|e| ConfigError::DatasetParse {
            path: origin.to_string(),
            source: e,
        })?;
    validate_places(&file)?;
    tracing::debug!(origin, count = file.places.len(), "loaded gazetteer");
    Ok(file)
}

/// Load and validate the fallback facility table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_fallback_facilities(path: &Path) -> Result<FacilitiesFile, ConfigError> {
    let content = read_dataset(path)?;
    parse_fallback_facilities(&content, &path.display().to_string())
}

/// Parse and validate fallback facility YAML. `origin` labels errors.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or a record is unusable.
pub fn parse_fallback_facilities(
    content: &str,
    origin: &str,
) -> Result<FacilitiesFile, ConfigError> {
    let file: FacilitiesFile =
        serde_yaml::from_str(content).map_err(|e| ConfigError::DatasetParse {
            path: origin.to_string(),
            source: e,
        })?;
    validate_facilities(&file)?;
    tracing::debug!(
        origin,
        count = file.facilities.len(),
        "loaded fallback facility table"
    );
    Ok(file)
}

fn read_dataset(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::DatasetIo {
        path: path.display().to_string(),
        source: e,
    })
}

fn validate_places(file: &PlacesFile) -> Result<(), ConfigError> {
    for (idx, place) in file.places.iter().enumerate() {
        if place.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "place #{idx} has an empty name"
            )));
        }
        if place.region.trim().is_empty() || place.country.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "place '{}' must have a region and a country",
                place.name
            )));
        }
    }
    Ok(())
}

fn validate_facilities(file: &FacilitiesFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for facility in &file.facilities {
        if facility.id.trim().is_empty() || facility.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fallback facility id and name must be non-empty".to_string(),
            ));
        }
        if !seen_ids.insert(facility.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate fallback facility id: '{}'",
                facility.id
            )));
        }
        if !facility.coordinates.is_valid() || facility.coordinates.is_null_island() {
            return Err(ConfigError::Validation(format!(
                "fallback facility '{}' has unusable coordinates",
                facility.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_places_and_keeps_duplicate_names() {
        let yaml = r"
places:
  - { name: Hyderabad, region: Telangana, country: India }
  - { name: Hyderabad, region: Sindh, country: Pakistan }
";
        let file = parse_places(yaml, "inline").expect("valid gazetteer");
        assert_eq!(file.places.len(), 2);
        assert_eq!(file.places[1].country, "Pakistan");
    }

    #[test]
    fn rejects_place_without_country() {
        let yaml = r#"
places:
  - { name: Springfield, region: Illinois, country: "" }
"#;
        let err = parse_places(yaml, "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn malformed_yaml_reports_origin() {
        let err = parse_places("places: [", "places.yaml").unwrap_err();
        assert!(
            matches!(err, ConfigError::DatasetParse { ref path, .. } if path == "places.yaml"),
            "got {err:?}"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_places(Path::new("/nonexistent/places.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::DatasetIo { .. }), "got {err:?}");
    }

    #[test]
    fn parses_fallback_facilities_with_defaults() {
        let yaml = r#"
facilities:
  - id: fallback/1
    name: Lilavati Hospital
    type: hospital
    city: Mumbai
    coordinates: { lat: 19.0509, lon: 72.8294 }
    emergency: true
"#;
        let file = parse_fallback_facilities(yaml, "inline").expect("valid table");
        let record = &file.facilities[0];
        assert_eq!(record.name, "Lilavati Hospital");
        assert!(record.emergency);
        assert!(record.rating.is_none());
        assert!(record.specialties.is_empty());
    }

    #[test]
    fn rejects_duplicate_fallback_ids() {
        let yaml = r"
facilities:
  - { id: a, name: One, type: hospital, coordinates: { lat: 1.0, lon: 1.0 } }
  - { id: a, name: Two, type: hospital, coordinates: { lat: 2.0, lon: 2.0 } }
";
        let err = parse_fallback_facilities(yaml, "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn rejects_null_island_fallback_record() {
        let yaml = r"
facilities:
  - { id: z, name: Zero, type: hospital, coordinates: { lat: 0.0, lon: 0.0 } }
";
        let err = parse_fallback_facilities(yaml, "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    fn shipped_dataset(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join(name)
    }

    #[test]
    fn load_places_from_real_file() {
        let path = shipped_dataset("places.yaml");
        let file = load_places(&path).expect("failed to load places.yaml");
        assert!(file.places.iter().any(|p| p.name == "Mumbai"));
    }

    #[test]
    fn load_fallback_facilities_from_real_file() {
        let path = shipped_dataset("fallback_facilities.yaml");
        let file = load_fallback_facilities(&path).expect("failed to load fallback_facilities.yaml");
        assert!(!file.facilities.is_empty());
    }
}
