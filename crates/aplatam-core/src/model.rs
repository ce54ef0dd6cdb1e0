// crates/aplatam-core/src/model.rs
use crate::error::{MapError, Result};
use crate::location::encode_component;
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` when latitude is within [-90, 90] and longitude within [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// One entry of the city catalog.
///
/// Records are created when the catalog is loaded and never mutated. The
/// `id` field also accepts `internalId`, the key used by the site's data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    #[serde(alias = "internalId")]
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub center: Coordinates,
    pub zoom: f64,
}

impl CityRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
        center: Coordinates,
        zoom: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            path: None,
            center,
            zoom,
        }
    }

    /// Label used in city lists: `"Buenos Aires, Argentina"`.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }

    /// Link to the map page for this city under a language prefix,
    /// e.g. `/es/map?id=ba`.
    pub fn map_link(&self, lang: &str) -> String {
        format!("/{}/map?id={}", lang, encode_component(&self.id))
    }

    /// Checks the record against the catalog invariants.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| MapError::InvalidRecord {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.is_empty() {
            return Err(invalid("empty id"));
        }
        if !self.center.is_valid() {
            return Err(invalid("center out of range"));
        }
        if !self.zoom.is_finite() || self.zoom < 0.0 {
            return Err(invalid("zoom must be a finite value >= 0"));
        }
        Ok(())
    }
}

impl NameMatch for CityRecord {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// Aggregate counts for a loaded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub cities: usize,
    pub countries: usize,
}
