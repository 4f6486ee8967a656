#![forbid(unsafe_code)]

use crate::facets::Dimension;
use crate::filter::FilterState;
use crate::record::ProjectRecord;
use serde::Serialize;
use std::collections::BTreeSet;

/// A compiled filter + search over a record sequence.
///
/// Within a dimension selected values are OR-ed; across dimensions they are
/// AND-ed. Dimensions with no selection impose nothing, and a record with no
/// value on a constrained dimension never matches it.
#[derive(Clone, Debug)]
pub struct Query<'f> {
    constraints: Vec<(Dimension, BTreeSet<&'f str>)>,
    needle: Option<String>,
}

impl<'f> Query<'f> {
    pub fn new(filters: &'f FilterState, search: &str) -> Self {
        let constraints = Dimension::ALL
            .into_iter()
            .map(|dimension| (dimension, filters.selected(dimension)))
            .filter(|(_, selected)| !selected.is_empty())
            .collect();
        Self {
            constraints,
            needle: normalize_search(search),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty() && self.needle.is_none()
    }

    pub fn matches(&self, record: &ProjectRecord) -> bool {
        let facets_ok = self.constraints.iter().all(|(dimension, selected)| {
            let values = dimension.record_values(record);
            if dimension.is_single_valued() {
                values.first().is_some_and(|value| selected.contains(value))
            } else {
                values.iter().any(|value| selected.contains(value))
            }
        });
        facets_ok && self.matches_text(record)
    }

    fn matches_text(&self, record: &ProjectRecord) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };
        record.name.to_lowercase().contains(needle)
            || record.description().to_lowercase().contains(needle)
    }

    /// Matching records, in store order.
    pub fn run<'r>(&self, records: &'r [ProjectRecord]) -> Vec<&'r ProjectRecord> {
        if self.is_unconstrained() {
            return records.iter().collect();
        }
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Trimmed, lower-cased search text; `None` when nothing remains.
pub fn normalize_search(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

pub fn visible<'r>(
    records: &'r [ProjectRecord],
    filters: &FilterState,
    search: &str,
) -> Vec<&'r ProjectRecord> {
    Query::new(filters, search).run(records)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub visible: usize,
    pub total: usize,
    pub active_filters: usize,
    pub searching: bool,
}

impl FilterSummary {
    pub fn label(&self) -> String {
        if self.active_filters == 0 && !self.searching {
            return format!("Showing all {} projects", self.total);
        }
        format!(
            "Showing {} of {} projects ({} filters active)",
            self.visible, self.total, self.active_filters
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::facets::FacetIndex;
    use crate::record::Readiness;

    fn record(name: &str, description: &str, category: &[&str], status: Option<&str>) -> ProjectRecord {
        ProjectRecord {
            description: Some(description.to_string()),
            category: category.iter().map(|v| v.to_string()).collect(),
            readiness: status.map(|s| Readiness {
                technology: Some(s.to_string()),
                business: None,
            }),
            ..ProjectRecord::named(name)
        }
    }

    fn dataset() -> Vec<ProjectRecord> {
        vec![
            record("Acala", "DeFi hub for Polkadot", &["DeFi", "DEX"], Some("Production")),
            record("Astar", "Smart contract platform", &["Smart Contracts"], Some("Production")),
            record("Moonbeam", "Ethereum-compatible parachain", &["EVM"], Some("Testnet")),
            record("Untagged", "Nothing set", &[], None),
        ]
    }

    fn state(records: &[ProjectRecord]) -> FilterState {
        FilterState::seeded(&FacetIndex::build(records, &CatalogConfig::default()))
    }

    fn names(out: Vec<&ProjectRecord>) -> Vec<&str> {
        out.into_iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn no_filters_and_blank_search_show_everything() {
        let records = dataset();
        let filters = state(&records);
        assert_eq!(visible(&records, &filters, "   ").len(), 4);
        assert!(Query::new(&filters, "").is_unconstrained());
    }

    #[test]
    fn or_within_a_dimension() {
        let records = dataset();
        let mut filters = state(&records);
        filters.toggle(Dimension::Category, "DeFi");
        filters.toggle(Dimension::Category, "EVM");
        assert_eq!(names(visible(&records, &filters, "")), vec!["Acala", "Moonbeam"]);
    }

    #[test]
    fn and_across_dimensions() {
        let records = dataset();
        let mut filters = state(&records);
        filters.toggle(Dimension::Category, "DeFi");
        filters.toggle(Dimension::Category, "EVM");
        filters.toggle(Dimension::Status, "Testnet");
        assert_eq!(names(visible(&records, &filters, "")), vec!["Moonbeam"]);
    }

    #[test]
    fn status_matches_by_equality_and_absent_status_never_matches() {
        let records = dataset();
        let mut filters = state(&records);
        filters.toggle(Dimension::Status, "Production");
        assert_eq!(names(visible(&records, &filters, "")), vec!["Acala", "Astar"]);
    }

    #[test]
    fn business_readiness_filters_by_equality() {
        let mut records = dataset();
        records[0].readiness.get_or_insert_with(Readiness::default).business =
            Some("Revenue".to_string());
        records[2].readiness.get_or_insert_with(Readiness::default).business =
            Some("Pre-revenue".to_string());
        let mut filters = state(&records);
        filters.toggle(Dimension::Business, "Revenue");
        assert_eq!(names(visible(&records, &filters, "")), vec!["Acala"]);

        filters.toggle(Dimension::Business, "Pre-revenue");
        filters.toggle(Dimension::Status, "Production");
        assert_eq!(names(visible(&records, &filters, "")), vec!["Acala"]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let records = dataset();
        let filters = state(&records);
        assert_eq!(names(visible(&records, &filters, "  MOON ")), vec!["Moonbeam"]);
        assert_eq!(names(visible(&records, &filters, "contract")), vec!["Astar"]);
        assert_eq!(
            names(visible(&records, &filters, "polkadot")),
            vec!["Acala"]
        );
    }

    #[test]
    fn empty_store_yields_empty_result() {
        let filters = FilterState::default();
        assert!(visible(&[], &filters, "acala").is_empty());
    }

    #[test]
    fn summary_label_reflects_activity() {
        let idle = FilterSummary {
            visible: 4,
            total: 4,
            active_filters: 0,
            searching: false,
        };
        assert_eq!(idle.label(), "Showing all 4 projects");
        let narrowed = FilterSummary {
            visible: 1,
            total: 4,
            active_filters: 2,
            searching: false,
        };
        assert_eq!(narrowed.label(), "Showing 1 of 4 projects (2 filters active)");
    }
}
