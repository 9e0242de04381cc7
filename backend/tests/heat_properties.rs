//! Property tests for the geographic heat aggregator.

use std::collections::HashSet;

use arch_timeline::algorithms::{aggregate_heat, aggregate_heat_buckets, LocatedItem};
use arch_timeline::geo::Gazetteer;
use proptest::prelude::*;

const PLACES: &[&str] = &[
    "Paris",
    "Paris, France",
    "paris",
    "Dessau, Germany",
    "Chicago, Illinois",
    "Barcelona",
    "Rome, Italy",
    "Nowhereville",
    "Atlantis",
    "",
    "   ",
    "a",
];

fn items_strategy() -> impl Strategy<Value = Vec<LocatedItem>> {
    prop::collection::vec(prop::sample::select(PLACES), 0..40).prop_map(|texts| {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| LocatedItem::new(i.to_string(), text))
            .collect()
    })
}

proptest! {
    #[test]
    fn intensities_sum_to_matched_items(items in items_strategy()) {
        let gazetteer = Gazetteer::shared();
        let matched = items
            .iter()
            .filter(|item| gazetteer.resolve(&item.location_text).is_some())
            .count();

        let heat = aggregate_heat(&items);
        prop_assert_eq!(heat.iter().map(|p| p.intensity).sum::<usize>(), matched);
        prop_assert!(heat.iter().all(|p| p.intensity > 0));
    }

    #[test]
    fn coordinates_are_unique(items in items_strategy()) {
        let heat = aggregate_heat(&items);
        let keys: HashSet<(u64, u64)> = heat
            .iter()
            .map(|p| (p.lat.to_bits(), p.lng.to_bits()))
            .collect();
        prop_assert_eq!(keys.len(), heat.len());
    }

    #[test]
    fn summary_accounts_for_every_item(items in items_strategy()) {
        let (buckets, summary) = aggregate_heat_buckets(&items, Gazetteer::shared());
        prop_assert_eq!(summary.input_count, items.len());
        prop_assert_eq!(summary.matched_count + summary.unmatched_ids.len(), items.len());
        prop_assert_eq!(summary.bucket_count, buckets.len());

        let contributors: usize = buckets.iter().map(|b| b.contributors.len()).sum();
        prop_assert_eq!(contributors, summary.matched_count);
    }

    #[test]
    fn resolution_is_idempotent(index in 0..PLACES.len()) {
        let gazetteer = Gazetteer::shared();
        let text = PLACES[index];
        prop_assert_eq!(gazetteer.resolve(text), gazetteer.resolve(text));
    }

    #[test]
    fn aggregation_is_repeatable(items in items_strategy()) {
        prop_assert_eq!(aggregate_heat(&items), aggregate_heat(&items));
    }
}

#[test]
fn test_paris_scenario() {
    let items = vec![
        LocatedItem::new("1", "Paris, France"),
        LocatedItem::new("2", "Paris"),
        LocatedItem::new("3", "Nowhereville"),
    ];
    let heat = aggregate_heat(&items);

    assert_eq!(heat.len(), 1);
    assert_eq!(heat[0].intensity, 2);
    let paris = Gazetteer::shared().resolve("Paris").unwrap();
    assert_eq!((heat[0].lat, heat[0].lng), (paris.lat, paris.lng));
}

#[test]
fn test_unresolvable_input_yields_empty_output() {
    let items = vec![
        LocatedItem::new("1", "Nowhereville"),
        LocatedItem::new("2", "Atlantis"),
        LocatedItem::new("3", ""),
    ];
    assert!(aggregate_heat(&items).is_empty());
    assert!(aggregate_heat(&[]).is_empty());
}
