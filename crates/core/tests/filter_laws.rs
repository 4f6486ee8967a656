use eco_core::query::visible;
use eco_core::record::Readiness;
use eco_core::{CatalogConfig, Dimension, FacetIndex, FilterState, ProjectRecord};
use proptest::prelude::*;
use std::collections::BTreeSet;

const CATEGORIES: &[&str] = &["DeFi", "DEX", "EVM", "NFT", "Bridge"];
const STATUSES: &[&str] = &["Production", "Testnet", "Concept"];
const ECOSYSTEMS: &[&str] = &["Polkadot", "Kusama", "Ethereum"];
const AUDIENCES: &[&str] = &["Developers", "Users"];

fn subset(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(pool, 0..=pool.len())
        .prop_map(|values| values.into_iter().map(str::to_string).collect())
}

fn record_strategy() -> impl Strategy<Value = ProjectRecord> {
    (
        "[a-z]{1,6}",
        subset(CATEGORIES),
        subset(ECOSYSTEMS),
        subset(AUDIENCES),
        proptest::option::of(proptest::sample::select(STATUSES)),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(name, category, ecosystem, target_audience, status, audit)| {
            ProjectRecord {
                category,
                ecosystem,
                target_audience,
                readiness: status.map(|s| Readiness {
                    technology: Some(s.to_string()),
                    business: None,
                }),
                audit,
                ..ProjectRecord::named(name)
            }
        })
}

fn dataset_strategy() -> impl Strategy<Value = Vec<ProjectRecord>> {
    proptest::collection::vec(record_strategy(), 0..12)
}

fn all_values(index: &FacetIndex) -> Vec<(Dimension, String)> {
    Dimension::ALL
        .into_iter()
        .flat_map(|dimension| {
            index
                .facet(dimension)
                .values()
                .iter()
                .map(move |value| (dimension, value.clone()))
        })
        .collect()
}

fn names(records: Vec<&ProjectRecord>) -> Vec<String> {
    records.into_iter().map(|r| r.name.clone()).collect()
}

proptest! {
    #[test]
    fn constraining_a_free_dimension_only_narrows(
        records in dataset_strategy(),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..4),
        extra in any::<prop::sample::Index>(),
        search in "[a-z]{0,2}",
    ) {
        let index = FacetIndex::build(&records, &CatalogConfig::default());
        let values = all_values(&index);
        prop_assume!(!values.is_empty());

        let mut filters = FilterState::seeded(&index);
        for pick in &picks {
            let (dimension, value) = pick.get(&values);
            filters.toggle(*dimension, value);
        }
        let (dimension, value) = extra.get(&values);
        prop_assume!(filters.selected(*dimension).is_empty());

        let before = names(visible(&records, &filters, &search))
            .into_iter()
            .collect::<BTreeSet<_>>();
        let mut narrowed = filters.clone();
        prop_assert!(narrowed.toggle(*dimension, value));
        let after = names(visible(&records, &narrowed, &search));
        for name in &after {
            prop_assert!(before.contains(name));
        }
    }

    #[test]
    fn selections_within_a_dimension_union(
        records in dataset_strategy(),
        a in prop::sample::select(CATEGORIES),
        b in prop::sample::select(CATEGORIES),
    ) {
        let index = FacetIndex::build(&records, &CatalogConfig::default());
        let facet = index.facet(Dimension::Category);
        prop_assume!(a != b && facet.contains(a) && facet.contains(b));

        let seeded = FilterState::seeded(&index);
        let mut only_a = seeded.clone();
        only_a.toggle(Dimension::Category, a);
        let mut only_b = seeded.clone();
        only_b.toggle(Dimension::Category, b);
        let mut both = only_a.clone();
        both.toggle(Dimension::Category, b);

        let union = names(visible(&records, &only_a, ""))
            .into_iter()
            .chain(names(visible(&records, &only_b, "")))
            .collect::<BTreeSet<_>>();
        let combined = names(visible(&records, &both, ""))
            .into_iter()
            .collect::<BTreeSet<_>>();
        prop_assert_eq!(union, combined);
    }

    #[test]
    fn toggle_is_an_involution(
        records in dataset_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = FacetIndex::build(&records, &CatalogConfig::default());
        let values = all_values(&index);
        prop_assume!(!values.is_empty());
        let (dimension, value) = pick.get(&values);

        let original = FilterState::seeded(&index);
        let mut state = original.clone();
        state.toggle(*dimension, value);
        state.toggle(*dimension, value);
        prop_assert_eq!(&state, &original);
        prop_assert_eq!(
            names(visible(&records, &state, "")),
            names(visible(&records, &original, ""))
        );
    }

    #[test]
    fn filtering_preserves_store_order(
        records in dataset_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = FacetIndex::build(&records, &CatalogConfig::default());
        let values = all_values(&index);
        prop_assume!(!values.is_empty());
        let (dimension, value) = pick.get(&values);
        let mut filters = FilterState::seeded(&index);
        filters.toggle(*dimension, value);

        let positions = visible(&records, &filters, "")
            .into_iter()
            .map(|r| records.iter().position(|c| std::ptr::eq(c, r)).unwrap())
            .collect::<Vec<_>>();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }
}
