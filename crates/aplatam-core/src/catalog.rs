// crates/aplatam-core/src/catalog.rs
use crate::error::{MapError, Result};
use crate::model::{CatalogStats, CityRecord};
use crate::traits::CityLookup;
use std::collections::HashSet;
#[cfg(feature = "json")]
use once_cell::sync::OnceCell;
#[cfg(feature = "json")]
use std::io::Read;
#[cfg(feature = "json")]
use std::path::Path;

#[cfg(feature = "json")]
static BUNDLED_JSON: &str = include_str!("../data/cities.json");

// Parsed once per process.
#[cfg(feature = "json")]
static BUNDLED: OnceCell<CityCatalog> = OnceCell::new();

/// Resolve a requested id to a record.
///
/// - `Some(id)` matching a record returns that record.
/// - Anything else (no id, unknown id) returns the **first** record in
///   catalog order.
/// - An empty slice is a configuration error: [`MapError::EmptyCatalog`].
pub fn find_by_id<'a>(records: &'a [CityRecord], id: Option<&str>) -> Result<&'a CityRecord> {
    let first = records.first().ok_or(MapError::EmptyCatalog)?;

    let Some(id) = id else {
        return Ok(first);
    };

    match records.iter().find(|c| c.id == id) {
        Some(city) => Ok(city),
        None => {
            tracing::warn!(requested = id, fallback = %first.id, "city id not in catalog");
            Ok(first)
        }
    }
}

/// Ordered, validated, read-only list of city records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityCatalog {
    records: Vec<CityRecord>,
}

impl CityCatalog {
    /// Build a catalog, validating every record and rejecting duplicate ids.
    ///
    /// An empty list is accepted here; lookups on it fail with
    /// [`MapError::EmptyCatalog`].
    pub fn from_records(records: Vec<CityRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for city in &records {
            city.validate()?;
            if !seen.insert(city.id.as_str()) {
                return Err(MapError::DuplicateId(city.id.clone()));
            }
        }
        Ok(Self { records })
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<CityRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    #[cfg(feature = "json")]
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<CityRecord> = serde_json::from_reader(reader)?;
        Self::from_records(records)
    }

    /// Load a catalog from a JSON file (or `.json.gz` with the `compact` feature).
    #[cfg(feature = "json")]
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = crate::loader::open_stream(path)?;
        let catalog = Self::from_reader(reader)?;
        tracing::info!(path = %path.display(), cities = catalog.len(), "loaded city catalog");
        Ok(catalog)
    }

    /// The catalog embedded in the crate (`data/cities.json`).
    #[cfg(feature = "json")]
    pub fn bundled() -> Result<Self> {
        BUNDLED
            .get_or_try_init(|| Self::from_json_str(BUNDLED_JSON))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CityRecord> {
        self.records.iter()
    }

    pub fn stats(&self) -> CatalogStats {
        let countries: HashSet<&str> = self.records.iter().map(|c| c.country.as_str()).collect();
        CatalogStats {
            cities: self.records.len(),
            countries: countries.len(),
        }
    }
}

impl CityLookup for CityCatalog {
    fn records(&self) -> &[CityRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a CityCatalog {
    type Item = &'a CityRecord;
    type IntoIter = std::slice::Iter<'a, CityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    fn city(id: &str, name: &str) -> CityRecord {
        CityRecord::new(id, name, "AR", Coordinates::new(-34.6, -58.4), 11.0)
    }

    #[test]
    fn find_by_id_returns_exact_match() {
        let records = vec![city("ba", "Buenos Aires"), city("co", "Córdoba")];
        let found = find_by_id(&records, Some("co")).unwrap();
        assert_eq!(found.id, "co");
    }

    #[test]
    fn find_by_id_falls_back_to_first() {
        let records = vec![city("ba", "Buenos Aires"), city("co", "Córdoba")];
        assert_eq!(find_by_id(&records, Some("zz")).unwrap().id, "ba");
        assert_eq!(find_by_id(&records, None).unwrap().id, "ba");
        assert_eq!(find_by_id(&records, Some("")).unwrap().id, "ba");
    }

    #[test]
    fn find_by_id_on_empty_catalog_fails() {
        let err = find_by_id(&[], Some("ba")).unwrap_err();
        assert!(matches!(err, MapError::EmptyCatalog));
        assert!(matches!(CityCatalog::default().find_by_id(None), Err(MapError::EmptyCatalog)));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = CityCatalog::from_records(vec![city("ba", "A"), city("ba", "B")]).unwrap_err();
        assert!(matches!(err, MapError::DuplicateId(id) if id == "ba"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(CityCatalog::from_json_str("{not json"), Err(MapError::Json(_))));
    }

    #[cfg(feature = "json")]
    #[test]
    fn bundled_catalog_starts_with_buenos_aires() {
        let catalog = CityCatalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.find_by_id(None).unwrap().id, "ba");
        assert_eq!(catalog.find_by_name("sao paulo").unwrap().id, "sp");
        assert_eq!(catalog.stats().cities, catalog.len());
    }

    #[test]
    fn substring_search_is_accent_insensitive() {
        let catalog =
            CityCatalog::from_records(vec![city("ba", "Buenos Aires"), city("co", "Córdoba")])
                .unwrap();
        let hits = catalog.find_by_substring("CORD");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "co");
        assert!(catalog.find_by_substring("  ").is_empty());
    }

    #[test]
    fn stats_counts_distinct_countries() {
        let mut sp = city("sp", "São Paulo");
        sp.country = "BR".into();
        let catalog =
            CityCatalog::from_records(vec![city("ba", "Buenos Aires"), city("co", "Córdoba"), sp])
                .unwrap();
        assert_eq!(catalog.stats(), CatalogStats { cities: 3, countries: 2 });
    }
}
