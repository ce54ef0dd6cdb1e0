//! Property-based tests for selection resolution and viewport merging.

use aplatam_core::prelude::*;
use aplatam_core::{effective_height, ViewportStore};
use proptest::prelude::*;

fn record(id: String) -> CityRecord {
    CityRecord::new(id, "City", "AR", Coordinates::new(-34.6, -58.4), 11.0)
}

prop_compose! {
    /// Catalogs of 1..8 records with distinct lowercase ids.
    fn catalog()(ids in prop::collection::hash_set("[a-z]{2,4}", 1..8)) -> Vec<CityRecord> {
        ids.into_iter().map(record).collect()
    }
}

fn partial() -> impl Strategy<Value = PartialViewport> {
    (
        prop::option::of(-90.0f64..90.0),
        prop::option::of(-180.0f64..180.0),
        prop::option::of(0.0f64..22.0),
        prop::option::of(0u32..4096),
        prop::option::of(0u32..4096),
    )
        .prop_map(|(latitude, longitude, zoom, width, height)| PartialViewport {
            latitude,
            longitude,
            zoom,
            width,
            height,
        })
}

proptest! {
    #[test]
    fn resolver_never_panics(input in ".*") {
        let _ = resolve(&input);
    }

    #[test]
    fn query_without_id_key_resolves_to_none(
        pairs in prop::collection::vec(("[a-hj-z][a-z]{0,5}", "[a-z0-9]{0,6}"), 0..6)
    ) {
        let query = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        prop_assert_eq!(resolve(&format!("?{query}")), None);
    }

    #[test]
    fn unknown_id_falls_back_to_first(records in catalog(), probe in "[0-9]{3}") {
        // Catalog ids are letters only, so a numeric probe never matches.
        let found = find_by_id(&records, Some(probe.as_str())).unwrap();
        prop_assert_eq!(found, &records[0]);
    }

    #[test]
    fn known_id_returns_that_record(records in catalog(), pick in any::<prop::sample::Index>()) {
        let wanted = &records[pick.index(records.len())];
        let found = find_by_id(&records, Some(wanted.id.as_str())).unwrap();
        prop_assert_eq!(found, wanted);
    }

    #[test]
    fn merge_preserves_untouched_fields(base in partial(), update in partial()) {
        let mut store = ViewportStore::new();
        store.merge(&base);
        let before = *store.viewport();
        let after = *store.merge(&update);

        prop_assert_eq!(after.latitude, update.latitude.unwrap_or(before.latitude));
        prop_assert_eq!(after.longitude, update.longitude.unwrap_or(before.longitude));
        prop_assert_eq!(after.zoom, update.zoom.unwrap_or(before.zoom));
        prop_assert_eq!(after.width, update.width.or(before.width));
        prop_assert_eq!(after.height, update.height.or(before.height));
    }

    #[test]
    fn effective_height_never_exceeds_window(total in any::<u32>(), chrome in prop::option::of(any::<u32>())) {
        prop_assert!(effective_height(total, chrome) <= total);
    }
}
