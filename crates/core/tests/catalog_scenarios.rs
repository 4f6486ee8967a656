use eco_core::metrics;
use eco_core::{
    ActivityLevel, CatalogConfig, CatalogEvent, CatalogState, Dimension, MetricSample,
    ProjectRecord, SortKey, SortSpec,
};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

const NOW: OffsetDateTime = datetime!(2025-06-01 09:30 UTC);

fn project(name: &str, category: &[&str], ecosystem: &[&str]) -> ProjectRecord {
    ProjectRecord {
        category: category.iter().map(|v| v.to_string()).collect(),
        ecosystem: ecosystem.iter().map(|v| v.to_string()).collect(),
        ..ProjectRecord::named(name)
    }
}

fn pushed_days_ago(name: &str, days: i64) -> ProjectRecord {
    let mut record = ProjectRecord::named(name);
    let at = NOW - Duration::days(days);
    record.metrics.insert(
        metrics::GITHUB_PUSHED_AT.to_string(),
        vec![MetricSample::new("2025-06-01", at.unix_timestamp() as u64)],
    );
    record
}

#[test]
fn category_filter_and_search_combine_conjunctively() {
    let state = CatalogState::loaded(
        CatalogConfig::default(),
        vec![
            project("Acala", &["DeFi"], &["Polkadot"]),
            project("Moonbeam", &["EVM"], &["Moonbeam"]),
        ],
    )
    .unwrap();

    let (state, view) = state.on_toggle(Dimension::Category, "DeFi", NOW);
    assert_eq!(view.card_names(), vec!["Acala"]);

    let (state, view) = state.on_search("moon", NOW);
    assert!(view.card_names().is_empty());

    let (_, view) = state.on_toggle(Dimension::Category, "DeFi", NOW);
    assert_eq!(view.card_names(), vec!["Moonbeam"]);
}

#[test]
fn ecosystem_outside_allow_list_cannot_be_selected() {
    let state = CatalogState::loaded(
        CatalogConfig::default(),
        vec![project("Snowbridge", &["Bridge"], &["Polkadot", "Ethereum"])],
    )
    .unwrap();

    let (state, view) = state.on_toggle(Dimension::Ecosystem, "Ethereum", NOW);
    let ecosystem = view.facet(Dimension::Ecosystem).unwrap();
    assert!(ecosystem.entries.iter().all(|e| e.value != "Ethereum"));
    assert!(!state.filters().has_active());
    assert_eq!(view.cards[0].ecosystem, vec!["Polkadot", "Ethereum"]);
}

#[test]
fn loading_the_same_records_twice_is_deterministic() {
    let records = vec![
        project("Acala", &["DeFi", "DEX"], &["Polkadot"]),
        project("Karura", &["DeFi"], &["Kusama"]),
        project("Astar", &["Smart Contracts", "EVM"], &["Polkadot"]),
    ];
    let first = CatalogState::loaded(CatalogConfig::default(), records.clone()).unwrap();
    let second = CatalogState::loaded(CatalogConfig::default(), records).unwrap();
    assert_eq!(first.facets(), second.facets());
    assert_eq!(first.colors(), second.colors());
    assert_eq!(first.view(NOW), second.view(NOW));
}

#[test]
fn toggling_twice_restores_the_result_set() {
    let state = CatalogState::loaded(
        CatalogConfig::default(),
        vec![
            project("Acala", &["DeFi"], &["Polkadot"]),
            project("Astar", &["EVM"], &["Polkadot"]),
        ],
    )
    .unwrap();
    let before = state.view(NOW);
    let (state, _) = state.on_toggle(Dimension::Category, "EVM", NOW);
    let (state, after) = state.on_toggle(Dimension::Category, "EVM", NOW);
    assert_eq!(before, after);
    assert!(!state.filters().has_active());
}

#[test]
fn name_sort_twice_is_a_no_op() {
    let state = CatalogState::loaded(
        CatalogConfig::default(),
        vec![
            project("b", &[], &[]),
            project("B", &[], &[]),
            project("a", &[], &[]),
        ],
    )
    .unwrap();
    let (state, once) = state.on_sort(SortSpec::ascending(SortKey::Name), NOW);
    let (_, twice) = state.on_sort(SortSpec::ascending(SortKey::Name), NOW);
    assert_eq!(once.card_names(), twice.card_names());
    assert_eq!(once.card_names(), vec!["B", "a", "b"]);
}

#[test]
fn cards_carry_activity_levels_at_the_boundaries() {
    let state = CatalogState::loaded(
        CatalogConfig::default(),
        vec![
            pushed_days_ago("d090", 90),
            pushed_days_ago("d091", 91),
            pushed_days_ago("d180", 180),
            pushed_days_ago("d181", 181),
            ProjectRecord::named("none"),
        ],
    )
    .unwrap();
    let view = state.view(NOW);
    let levels = view
        .cards
        .iter()
        .map(|card| (card.name.as_str(), card.activity))
        .collect::<Vec<_>>();
    assert_eq!(
        levels,
        vec![
            ("d090", ActivityLevel::Active),
            ("d091", ActivityLevel::Moderate),
            ("d180", ActivityLevel::Moderate),
            ("d181", ActivityLevel::Inactive),
            ("none", ActivityLevel::Unknown),
        ]
    );
}

#[test]
fn records_without_a_dimension_never_match_it() {
    let state = CatalogState::loaded(
        CatalogConfig::default(),
        vec![
            project("Acala", &["DeFi"], &["Polkadot"]),
            project("Bare", &[], &[]),
        ],
    )
    .unwrap();
    let state = state.apply(CatalogEvent::Toggle {
        dimension: Dimension::Ecosystem,
        value: "Polkadot".to_string(),
    });
    let names = state
        .visible()
        .into_iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Acala"]);
}
