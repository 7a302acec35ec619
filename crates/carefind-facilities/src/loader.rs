//! Facility-area loading with an explicit fallback source.

use carefind_core::{Coordinates, FacilityRecord};

use crate::client::OverpassClient;
use crate::error::FacilityError;
use crate::fallback::FallbackTable;

/// Which source produced an [`AreaLoad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacilitySource {
    Live,
    Fallback,
}

/// Facilities found around a point, nearest first.
#[derive(Debug, Clone)]
pub struct AreaLoad {
    pub facilities: Vec<FacilityRecord>,
    pub source: FacilitySource,
}

/// Loads the facility snapshot for an area.
///
/// Provider failures are absorbed into an empty live result. The fallback
/// table is consulted only when the live result is empty.
#[derive(Debug, Clone)]
pub struct FacilityAreaLoader {
    client: OverpassClient,
    fallback: Option<FallbackTable>,
}

impl FacilityAreaLoader {
    #[must_use]
    pub fn new(client: OverpassClient) -> Self {
        Self {
            client,
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, table: FallbackTable) -> Self {
        self.fallback = Some(table);
        self
    }

    /// # Errors
    ///
    /// Returns [`FacilityError::InvalidInput`] for an invalid center or a
    /// non-positive radius. Transport errors never surface here.
    pub async fn load_area(
        &self,
        center: Coordinates,
        radius_m: f64,
    ) -> Result<AreaLoad, FacilityError> {
        let live = match self.client.fetch_hospitals(center, radius_m).await {
            Ok(records) => records,
            Err(e @ FacilityError::InvalidInput(_)) => return Err(e),
            Err(e) => {
                tracing::warn!(
                    lat = center.lat,
                    lon = center.lon,
                    radius_m,
                    source = "overpass",
                    error = %e,
                    "facility area fetch failed; treating as empty"
                );
                Vec::new()
            }
        };

        if !live.is_empty() {
            return Ok(AreaLoad {
                facilities: live,
                source: FacilitySource::Live,
            });
        }

        match &self.fallback {
            Some(table) => {
                let facilities = table.within(center, radius_m);
                tracing::info!(
                    lat = center.lat,
                    lon = center.lon,
                    count = facilities.len(),
                    "live facility source empty; using fallback table"
                );
                Ok(AreaLoad {
                    facilities,
                    source: FacilitySource::Fallback,
                })
            }
            None => Ok(AreaLoad {
                facilities: live,
                source: FacilitySource::Live,
            }),
        }
    }
}
