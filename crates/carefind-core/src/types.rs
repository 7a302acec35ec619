//! Shared domain types for place and facility search.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` when both components are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// `true` for exactly (0, 0), which providers emit as a missing-value sentinel.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_null_island(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }
}

/// An entry of the static gazetteer.
///
/// Names are not unique: the same place name may appear in several regions
/// or countries and every entry is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub region: String,
    pub country: String,
}

impl PlaceRecord {
    /// `"<name>, <region>, <country>"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}, {}", self.name, self.region, self.country)
    }
}

/// A health facility record supplied by the caller (or the area loader).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: String,
    /// Free-text specialties, e.g. `"cardiology; oncology"`.
    #[serde(default)]
    pub specialties: String,
    #[serde(default)]
    pub city: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub distance_meters: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub emergency: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Place,
    Facility,
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionKind::Place => write!(f, "place"),
            SuggestionKind::Facility => write!(f, "facility"),
        }
    }
}

/// The engine's own certainty label for a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

/// One ranked candidate returned to the caller.
///
/// Build through the constructors: a `Facility` suggestion always carries
/// `facility`, a `Place` suggestion never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub display_name: String,
    pub kind: SuggestionKind,
    pub confidence: Confidence,
    pub coordinates: Option<Coordinates>,
    pub facility: Option<FacilityRecord>,
    pub rating: Option<f64>,
    pub distance_meters: Option<f64>,
}

impl Suggestion {
    /// A place suggestion from the static gazetteer (no coordinates yet).
    #[must_use]
    pub fn from_place(place: &PlaceRecord, confidence: Confidence) -> Self {
        Self {
            name: place.name.clone(),
            display_name: place.display_name(),
            kind: SuggestionKind::Place,
            confidence,
            coordinates: None,
            facility: None,
            rating: None,
            distance_meters: None,
        }
    }

    /// A place suggestion already geocoded by a remote provider.
    #[must_use]
    pub fn resolved_place(
        name: impl Into<String>,
        display_name: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            kind: SuggestionKind::Place,
            confidence: Confidence::High,
            coordinates: Some(coordinates),
            facility: None,
            rating: None,
            distance_meters: None,
        }
    }

    /// A facility suggestion; display name is `"<name> - <city>"`, or
    /// `"<name> - Hospital"` when the city is blank.
    #[must_use]
    pub fn from_facility(record: &FacilityRecord) -> Self {
        let city = record.city.trim();
        let suffix = if city.is_empty() { "Hospital" } else { city };
        Self {
            name: record.name.clone(),
            display_name: format!("{} - {suffix}", record.name),
            kind: SuggestionKind::Facility,
            confidence: Confidence::High,
            coordinates: Some(record.coordinates),
            facility: Some(record.clone()),
            rating: record.rating,
            distance_meters: record.distance_meters,
        }
    }

    /// Case-insensitive identity used when merging sources.
    #[must_use]
    pub fn dedup_key(&self) -> (String, SuggestionKind) {
        (self.name.to_lowercase(), self.kind)
    }
}

/// A single committed location resolved to coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl GeocodeResult {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(name: &str, city: &str) -> FacilityRecord {
        FacilityRecord {
            id: "node/1".to_string(),
            name: name.to_string(),
            facility_type: "hospital".to_string(),
            specialties: String::new(),
            city: city.to_string(),
            coordinates: Coordinates::new(19.07, 72.87),
            rating: Some(4.2),
            distance_meters: Some(1200.0),
            address: None,
            phone: None,
            website: None,
            emergency: false,
        }
    }

    #[test]
    fn place_display_name_joins_region_and_country() {
        let place = PlaceRecord {
            name: "Mumbai".to_string(),
            region: "Maharashtra".to_string(),
            country: "India".to_string(),
        };
        let s = Suggestion::from_place(&place, Confidence::High);
        assert_eq!(s.display_name, "Mumbai, Maharashtra, India");
        assert_eq!(s.kind, SuggestionKind::Place);
        assert!(s.facility.is_none());
        assert!(s.coordinates.is_none());
    }

    #[test]
    fn facility_suggestion_carries_record_and_city() {
        let s = Suggestion::from_facility(&facility("Apollo Hospital", "Chennai"));
        assert_eq!(s.display_name, "Apollo Hospital - Chennai");
        assert_eq!(s.kind, SuggestionKind::Facility);
        assert_eq!(s.confidence, Confidence::High);
        assert_eq!(s.rating, Some(4.2));
        assert_eq!(s.distance_meters, Some(1200.0));
        assert!(s.facility.is_some());
    }

    #[test]
    fn facility_without_city_falls_back_to_hospital_label() {
        let s = Suggestion::from_facility(&facility("St. Mary", "  "));
        assert_eq!(s.display_name, "St. Mary - Hospital");
    }

    #[test]
    fn dedup_key_ignores_case() {
        let a = Suggestion::resolved_place("Pune", "Pune, India", Coordinates::new(18.5, 73.8));
        let b = Suggestion::resolved_place("PUNE", "Pune City", Coordinates::new(18.5, 73.8));
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn coordinate_validity() {
        assert!(Coordinates::new(40.7, -74.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
        assert!(Coordinates::new(0.0, 0.0).is_null_island());
        assert!(!Coordinates::new(0.0, 0.1).is_null_island());
    }

    #[test]
    fn facility_record_reads_type_field() {
        let json = serde_json::json!({
            "id": "way/7",
            "name": "City General Hospital",
            "type": "hospital",
            "coordinates": { "lat": 12.9, "lon": 77.6 }
        });
        let record: FacilityRecord = serde_json::from_value(json).expect("valid record");
        assert_eq!(record.facility_type, "hospital");
        assert!(record.rating.is_none());
        assert!(!record.emergency);
    }
}
