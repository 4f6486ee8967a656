#![forbid(unsafe_code)]

use super::{Dimension, NO, YES};
use crate::config::CatalogConfig;
use crate::record::ProjectRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct values of one dimension with per-value record counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Facet {
    counts: BTreeMap<String, usize>,
    order: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FacetEntry<'a> {
    pub value: &'a str,
    pub count: usize,
}

impl Facet {
    pub fn contains(&self, value: &str) -> bool {
        self.counts.contains_key(value)
    }

    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Values in display order.
    pub fn values(&self) -> &[String] {
        &self.order
    }

    pub fn entries(&self) -> impl Iterator<Item = FacetEntry<'_>> {
        self.order.iter().map(|value| FacetEntry {
            value: value.as_str(),
            count: self.count(value),
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Facets for every [`Dimension`], rebuilt in full from the record store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FacetIndex {
    facets: BTreeMap<Dimension, Facet>,
}

impl FacetIndex {
    pub fn build(records: &[ProjectRecord], config: &CatalogConfig) -> Self {
        let mut counts: BTreeMap<Dimension, BTreeMap<String, usize>> = BTreeMap::new();

        for record in records {
            for dimension in Dimension::ALL {
                // A record counts once per value even if its source repeats it.
                let values = dimension
                    .record_values(record)
                    .into_iter()
                    .filter(|v| dimension != Dimension::Ecosystem || config.allows_ecosystem(v))
                    .collect::<BTreeSet<_>>();
                let slot = counts.entry(dimension).or_default();
                for value in values {
                    *slot.entry(value.to_string()).or_insert(0) += 1;
                }
            }
        }

        let facets = Dimension::ALL
            .into_iter()
            .map(|dimension| {
                let counts = counts.remove(&dimension).unwrap_or_default();
                let order = match dimension {
                    Dimension::TreasuryFunded | Dimension::Audit => {
                        display_order(counts.keys(), &[YES.to_string(), NO.to_string()])
                    }
                    _ => display_order(counts.keys(), config.priority(dimension)),
                };
                (dimension, Facet { counts, order })
            })
            .collect();

        Self { facets }
    }

    pub fn facet(&self, dimension: Dimension) -> &Facet {
        static EMPTY: Facet = Facet {
            counts: BTreeMap::new(),
            order: Vec::new(),
        };
        self.facets.get(&dimension).unwrap_or(&EMPTY)
    }

    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        self.facet(dimension).contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.facets.values().all(Facet::is_empty)
    }
}

/// Priority-list members that are present come first, in list order; the
/// rest follow alphabetically.
pub fn display_order<'a>(
    present: impl Iterator<Item = &'a String>,
    priority: &[String],
) -> Vec<String> {
    let present = present.collect::<BTreeSet<_>>();
    let mut order = Vec::with_capacity(present.len());
    for candidate in priority {
        if present.contains(candidate) && !order.contains(candidate) {
            order.push(candidate.clone());
        }
    }
    for value in present {
        if !priority.contains(value) {
            order.push(value.clone());
        }
    }
    order
}
