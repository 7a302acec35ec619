//! Distance-based filtering of facilities around a committed location.

use std::cmp::Ordering;

use carefind_core::{distance_meters, Coordinates, FacilityRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NearbySort {
    /// Nearest first; equal distances ordered by name.
    #[default]
    Distance,
    /// Highest rated first; unrated last, equal ratings nearest first.
    Rating,
}

/// Filter and sort criteria applied to a facility snapshot.
///
/// Built with [`NearbyFilter::around`] and the chained setters:
///
/// ```
/// use carefind_core::Coordinates;
/// use carefind_search::{NearbyFilter, NearbySort};
///
/// let filter = NearbyFilter::around(Coordinates::new(19.076, 72.8777))
///     .within_meters(5_000.0)
///     .min_rating(4.0)
///     .sort_by(NearbySort::Rating);
/// assert!(filter.apply(&[]).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyFilter {
    pub origin: Coordinates,
    pub max_distance_m: Option<f64>,
    pub min_rating: Option<f64>,
    pub facility_type: Option<String>,
    pub specialty: Option<String>,
    pub emergency_only: bool,
    pub sort: NearbySort,
}

impl NearbyFilter {
    /// No criteria besides the origin; sorts nearest first.
    #[must_use]
    pub fn around(origin: Coordinates) -> Self {
        Self {
            origin,
            max_distance_m: None,
            min_rating: None,
            facility_type: None,
            specialty: None,
            emergency_only: false,
            sort: NearbySort::Distance,
        }
    }

    #[must_use]
    pub fn within_meters(mut self, radius_m: f64) -> Self {
        self.max_distance_m = Some(radius_m);
        self
    }

    /// Records without a rating fail this criterion.
    #[must_use]
    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    #[must_use]
    pub fn facility_type(mut self, facility_type: impl Into<String>) -> Self {
        self.facility_type = Some(facility_type.into().to_lowercase());
        self
    }

    #[must_use]
    pub fn specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into().to_lowercase());
        self
    }

    #[must_use]
    pub fn emergency_only(mut self) -> Self {
        self.emergency_only = true;
        self
    }

    #[must_use]
    pub fn sort_by(mut self, sort: NearbySort) -> Self {
        self.sort = sort;
        self
    }

    /// Annotate every record with its distance from `origin`, keep those
    /// matching all criteria, and sort them.
    ///
    /// Records whose distance is NaN (invalid coordinates) never pass a
    /// radius check and sort after every finite distance.
    #[must_use]
    pub fn apply(&self, facilities: &[FacilityRecord]) -> Vec<FacilityRecord> {
        let mut kept: Vec<FacilityRecord> = facilities
            .iter()
            .filter_map(|record| {
                let meters = distance_meters(self.origin, record.coordinates);
                if !self.matches(record, meters) {
                    return None;
                }
                let mut record = record.clone();
                record.distance_meters = Some(meters);
                Some(record)
            })
            .collect();

        match self.sort {
            NearbySort::Distance => kept.sort_by(|a, b| {
                compare_distance(a, b).then_with(|| a.name.cmp(&b.name))
            }),
            NearbySort::Rating => kept.sort_by(|a, b| {
                compare_rating_desc(a.rating, b.rating).then_with(|| compare_distance(a, b))
            }),
        }

        tracing::debug!(
            candidates = facilities.len(),
            kept = kept.len(),
            sort = ?self.sort,
            "nearby filter applied"
        );
        kept
    }

    fn matches(&self, record: &FacilityRecord, meters: f64) -> bool {
        if let Some(max) = self.max_distance_m {
            if meters.is_nan() || meters > max {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if !record.rating.is_some_and(|r| r >= min) {
                return false;
            }
        }
        if let Some(wanted) = &self.facility_type {
            if !record.facility_type.to_lowercase().contains(wanted.as_str()) {
                return false;
            }
        }
        if let Some(wanted) = &self.specialty {
            if !record.specialties.to_lowercase().contains(wanted.as_str()) {
                return false;
            }
        }
        !self.emergency_only || record.emergency
    }
}

fn compare_distance(a: &FacilityRecord, b: &FacilityRecord) -> Ordering {
    let a = a.distance_meters.unwrap_or(f64::NAN);
    let b = b.distance_meters.unwrap_or(f64::NAN);
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

fn compare_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
