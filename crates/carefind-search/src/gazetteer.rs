//! Static in-memory catalog of known places.

use std::path::Path;

use carefind_core::{AppConfig, Confidence, ConfigError, PlaceRecord, Suggestion};

use crate::query::normalize;

/// Read-only place catalog, loaded once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: Vec<PlaceRecord>,
    /// Lowercased names, index-aligned with `places`.
    folded: Vec<String>,
}

impl Gazetteer {
    #[must_use]
    pub fn new(places: Vec<PlaceRecord>) -> Self {
        let folded = places.iter().map(|p| p.name.to_lowercase()).collect();
        Self { places, folded }
    }

    /// Load the catalog from a YAML file (see [`carefind_core::load_places`]).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = carefind_core::load_places(path)?;
        Ok(Self::new(file.places))
    }

    /// Load the catalog named by `config.gazetteer_path`.
    ///
    /// # Errors
    ///
    /// Same as [`Gazetteer::from_file`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::from_file(&config.gazetteer_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Case-insensitive lookup, at most `limit` results.
    ///
    /// Names starting with the query come first (`High` confidence), then
    /// names merely containing it (`Medium`); catalog order is kept within
    /// each bucket. Queries under two characters return nothing.
    #[must_use]
    pub fn lookup(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let Some(needle) = normalize(query) else {
            return Vec::new();
        };
        if limit == 0 {
            return Vec::new();
        }

        let mut prefix = Vec::new();
        let mut contains = Vec::new();
        for (place, name) in self.places.iter().zip(&self.folded) {
            if name.starts_with(&needle) {
                prefix.push(place);
                if prefix.len() == limit {
                    break;
                }
            } else if contains.len() < limit && name.contains(&needle) {
                contains.push(place);
            }
        }

        let room = limit - prefix.len();
        prefix
            .into_iter()
            .map(|p| Suggestion::from_place(p, Confidence::High))
            .chain(
                contains
                    .into_iter()
                    .take(room)
                    .map(|p| Suggestion::from_place(p, Confidence::Medium)),
            )
            .collect()
    }
}
