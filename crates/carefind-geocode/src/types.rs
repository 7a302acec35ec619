//! Wire types for the place-search provider's JSON response.

use carefind_core::Coordinates;
use serde::Deserialize;

/// One search hit. `lat`/`lon` arrive as numeric strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(rename = "type", default)]
    pub place_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<serde_json::Value>,
}

impl NominatimPlace {
    /// Parsed coordinates, or `None` when either value is malformed,
    /// out of range, or exactly (0, 0).
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lon = self.lon.trim().parse::<f64>().ok()?;
        let coords = Coordinates::new(lat, lon);
        (coords.is_valid() && !coords.is_null_island()).then_some(coords)
    }

    /// The provider's `name` when present, otherwise the first
    /// comma-separated segment of `display_name`.
    #[must_use]
    pub fn short_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                return name.to_string();
            }
        }
        self.display_name
            .split(',')
            .next()
            .map_or_else(String::new, |s| s.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(display_name: &str, lat: &str, lon: &str) -> NominatimPlace {
        NominatimPlace {
            display_name: display_name.to_string(),
            lat: lat.to_string(),
            lon: lon.to_string(),
            place_type: None,
            name: None,
            address: None,
        }
    }

    #[test]
    fn parses_numeric_string_coordinates() {
        let p = place("Pune, Maharashtra, India", "18.5204", "73.8567");
        let c = p.coordinates().expect("valid coordinates");
        assert!((c.lat - 18.5204).abs() < 1e-9);
        assert!((c.lon - 73.8567).abs() < 1e-9);
    }

    #[test]
    fn rejects_garbage_and_null_island() {
        assert!(place("X", "abc", "1.0").coordinates().is_none());
        assert!(place("X", "0", "0").coordinates().is_none());
        assert!(place("X", "95.0", "10.0").coordinates().is_none());
    }

    #[test]
    fn short_name_prefers_name_field() {
        let mut p = place("Pune, Maharashtra, India", "18.5", "73.8");
        assert_eq!(p.short_name(), "Pune");
        p.name = Some("Pune City".to_string());
        assert_eq!(p.short_name(), "Pune City");
        p.name = Some("  ".to_string());
        assert_eq!(p.short_name(), "Pune");
    }

    #[test]
    fn deserializes_provider_shape() {
        let json = serde_json::json!({
            "place_id": 1,
            "display_name": "Mumbai, Maharashtra, India",
            "lat": "19.0760",
            "lon": "72.8777",
            "type": "city",
            "address": { "city": "Mumbai", "country_code": "in" }
        });
        let p: NominatimPlace = serde_json::from_value(json).expect("valid shape");
        assert_eq!(p.place_type.as_deref(), Some("city"));
        assert!(p.coordinates().is_some());
    }
}
