//! Overpass QL for hospitals around a point.

use carefind_core::Coordinates;

/// Server-side evaluation budget embedded in the query, in seconds.
pub const QUERY_TIMEOUT_SECS: u64 = 25;

/// Build a query for every node, way, and relation tagged
/// `amenity=hospital` within `radius_m` meters of `center`.
#[must_use]
pub fn build_hospital_query(center: Coordinates, radius_m: f64) -> String {
    let around = format!("around:{radius_m:.0},{},{}", center.lat, center.lon);
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];(\
node[\"amenity\"=\"hospital\"]({around});\
way[\"amenity\"=\"hospital\"]({around});\
relation[\"amenity\"=\"hospital\"]({around});\
);out center tags;"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_covers_all_element_types() {
        let q = build_hospital_query(Coordinates::new(19.076, 72.8777), 5000.0);
        assert!(q.starts_with("[out:json][timeout:25];"));
        for kind in ["node", "way", "relation"] {
            assert!(
                q.contains(&format!(
                    "{kind}[\"amenity\"=\"hospital\"](around:5000,19.076,72.8777);"
                )),
                "missing {kind} clause in {q}"
            );
        }
        assert!(q.ends_with("out center tags;"));
    }

    #[test]
    fn radius_is_rounded_to_whole_meters() {
        let q = build_hospital_query(Coordinates::new(1.5, 2.5), 1234.6);
        assert!(q.contains("around:1235,1.5,2.5"), "{q}");
    }
}
