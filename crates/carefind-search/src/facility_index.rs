//! Substring search over a caller-supplied facility snapshot.

use std::cmp::Ordering;

use carefind_core::{FacilityRecord, Suggestion};

use crate::query::normalize;

/// Stateless matcher; the snapshot is passed on every call so the caller can
/// replace it freely between searches.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacilityIndex;

impl FacilityIndex {
    /// Facilities whose name, specialties, type, or city contain `query`
    /// (case-insensitive), at most `limit` results.
    ///
    /// Name-prefix matches come first; within each group higher rating wins
    /// (missing counts as 0) and ties keep input order.
    #[must_use]
    pub fn search(query: &str, facilities: &[FacilityRecord], limit: usize) -> Vec<Suggestion> {
        let Some(needle) = normalize(query) else {
            return Vec::new();
        };
        if limit == 0 {
            return Vec::new();
        }

        let mut matches: Vec<(bool, &FacilityRecord)> = facilities
            .iter()
            .filter_map(|record| {
                let name = record.name.to_lowercase();
                let prefix = name.starts_with(&needle);
                let hit = prefix
                    || name.contains(&needle)
                    || record.specialties.to_lowercase().contains(&needle)
                    || record.facility_type.to_lowercase().contains(&needle)
                    || record.city.to_lowercase().contains(&needle);
                hit.then_some((prefix, record))
            })
            .collect();

        // Stable sort keeps input order for equal keys.
        matches.sort_by(|(a_prefix, a), (b_prefix, b)| {
            b_prefix
                .cmp(a_prefix)
                .then_with(|| compare_rating_desc(a.rating, b.rating))
        });

        matches
            .into_iter()
            .take(limit)
            .map(|(_, record)| Suggestion::from_facility(record))
            .collect()
    }
}

fn compare_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(0.0).total_cmp(&a.unwrap_or(0.0))
}
