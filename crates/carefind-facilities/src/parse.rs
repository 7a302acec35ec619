//! Overpass elements to facility records.

use carefind_core::{distance_meters, Coordinates, FacilityRecord};

use crate::types::OverpassElement;

/// Convert raw elements into facility records, nearest first.
///
/// Elements without a `name` tag, without coordinates, or positioned at
/// exactly (0, 0) are dropped. Ratings are left empty: the provider has none.
#[must_use]
pub fn parse_elements(elements: &[OverpassElement], center: Coordinates) -> Vec<FacilityRecord> {
    let mut records: Vec<FacilityRecord> = elements
        .iter()
        .filter_map(|element| element_to_record(element, center))
        .collect();

    records.sort_by(|a, b| {
        let da = a.distance_meters.unwrap_or(f64::INFINITY);
        let db = b.distance_meters.unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
    });
    records
}

fn element_to_record(element: &OverpassElement, center: Coordinates) -> Option<FacilityRecord> {
    let name = tag(element, "name")?;
    let coordinates = element_coordinates(element)?;
    if coordinates.is_null_island() || !coordinates.is_valid() {
        tracing::debug!(id = element.id, name, "dropping facility without usable position");
        return None;
    }

    let address = match (tag(element, "addr:housenumber"), tag(element, "addr:street")) {
        (Some(number), Some(street)) => Some(format!("{number} {street}")),
        (None, Some(street)) => Some(street.to_string()),
        _ => None,
    };

    Some(FacilityRecord {
        id: format!("{}/{}", element.element_type, element.id),
        name: name.to_string(),
        facility_type: tag(element, "healthcare").unwrap_or("hospital").to_string(),
        specialties: tag(element, "healthcare:speciality")
            .unwrap_or_default()
            .to_string(),
        city: tag(element, "addr:city").unwrap_or_default().to_string(),
        coordinates,
        rating: None,
        distance_meters: Some(distance_meters(center, coordinates)),
        address,
        phone: tag(element, "phone")
            .or_else(|| tag(element, "contact:phone"))
            .map(str::to_string),
        website: tag(element, "website")
            .or_else(|| tag(element, "contact:website"))
            .map(str::to_string),
        emergency: tag(element, "emergency") == Some("yes"),
    })
}

fn element_coordinates(element: &OverpassElement) -> Option<Coordinates> {
    match (element.lat, element.lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        _ => element.center.map(|c| Coordinates::new(c.lat, c.lon)),
    }
}

/// Non-blank tag value, trimmed.
fn tag<'a>(element: &'a OverpassElement, key: &str) -> Option<&'a str> {
    element
        .tags
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
