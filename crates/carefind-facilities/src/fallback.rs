//! Static facility table used when the live provider returns nothing.

use std::path::Path;

use carefind_core::{distance_meters, AppConfig, ConfigError, Coordinates, FacilityRecord};

/// Injected fallback dataset. Selection is purely geometric: every entry
/// within the requested radius is returned, regardless of city.
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    records: Vec<FacilityRecord>,
}

impl FallbackTable {
    #[must_use]
    pub fn new(records: Vec<FacilityRecord>) -> Self {
        Self { records }
    }

    /// Load the table from a YAML file (see [`carefind_core::load_fallback_facilities`]).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = carefind_core::load_fallback_facilities(path)?;
        Ok(Self::new(file.facilities))
    }

    /// Load the table named by `config.fallback_facilities_path`, or `None`
    /// when no fallback is configured.
    ///
    /// # Errors
    ///
    /// Same as [`FallbackTable::from_file`].
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, ConfigError> {
        config
            .fallback_facilities_path
            .as_deref()
            .map(Self::from_file)
            .transpose()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entries within `radius_m` of `center`, with `distance_meters` set,
    /// nearest first.
    #[must_use]
    pub fn within(&self, center: Coordinates, radius_m: f64) -> Vec<FacilityRecord> {
        let mut hits: Vec<FacilityRecord> = self
            .records
            .iter()
            .filter_map(|record| {
                let d = distance_meters(center, record.coordinates);
                (d <= radius_m).then(|| FacilityRecord {
                    distance_meters: Some(d),
                    ..record.clone()
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.distance_meters
                .unwrap_or(f64::INFINITY)
                .total_cmp(&b.distance_meters.unwrap_or(f64::INFINITY))
        });
        hits
    }
}
