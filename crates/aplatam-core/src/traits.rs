// crates/aplatam-core/src/traits.rs
use crate::catalog::find_by_id;
use crate::error::Result;
use crate::model::CityRecord;
use crate::text::{equals_folded, fold_key};

/// Name-based matching helpers for types that expose a display name.
///
/// Comparisons are accent-insensitive and case-insensitive, based on
/// [`fold_key`].
///
/// # Examples
/// ```rust
/// use aplatam_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("São Paulo").is_named("sao paulo"));
/// assert!(Place("Córdoba").name_contains("cordo"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        equals_folded(self.name_str(), q)
    }

    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}

/// Read-only access to an ordered list of city records.
///
/// Catalog order matters: it decides the fallback city when a requested id is
/// missing.
pub trait CityLookup {
    fn records(&self) -> &[CityRecord];

    /// Exact id match, else the first record. See [`find_by_id`].
    fn find_by_id(&self, id: Option<&str>) -> Result<&CityRecord> {
        find_by_id(self.records(), id)
    }

    /// First record whose name equals `query` after folding.
    fn find_by_name(&self, query: &str) -> Option<&CityRecord> {
        self.records().iter().find(|c| c.is_named(query))
    }

    /// All records whose folded name contains `query`.
    fn find_by_substring(&self, query: &str) -> Vec<&CityRecord> {
        let q = fold_key(query.trim());
        if q.is_empty() {
            return Vec::new();
        }
        self.records()
            .iter()
            .filter(|c| fold_key(&c.name).contains(&q))
            .collect()
    }
}

impl CityLookup for [CityRecord] {
    fn records(&self) -> &[CityRecord] {
        self
    }
}

impl CityLookup for Vec<CityRecord> {
    fn records(&self) -> &[CityRecord] {
        self
    }
}
