#![forbid(unsafe_code)]

use super::{CatalogState, LoadStatus};
use crate::activity::{ActivityLevel, ActivityThresholds, record_activity};
use crate::config::Rgb;
use crate::facets::{CategoryGroup, Dimension, category_groups};
use crate::query::FilterSummary;
use crate::record::{ProjectRecord, WebLink};
use crate::store::SortSpec;
use serde::Serialize;
use time::OffsetDateTime;

/// Everything the presentation layer needs after one state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub load: LoadStatus,
    pub summary: FilterSummary,
    pub search: String,
    pub sort: SortSpec,
    pub cards: Vec<CardView>,
    pub facets: Vec<FacetView>,
    pub category_groups: Vec<CategoryGroup>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FacetView {
    pub dimension: Dimension,
    pub entries: Vec<FacetEntryView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FacetEntryView {
    pub value: String,
    pub count: usize,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub name: String,
    pub description: String,
    pub category: Vec<String>,
    pub ecosystem: Vec<String>,
    pub target_audience: Vec<String>,
    pub status: Option<String>,
    pub readiness: String,
    pub activity: ActivityLevel,
    pub stars: Option<u64>,
    pub logo: String,
    pub links: Vec<WebLink>,
    pub treasury_funded: Option<bool>,
    pub audit: Option<bool>,
}

impl CardView {
    pub fn from_record(
        record: &ProjectRecord,
        now: OffsetDateTime,
        thresholds: &ActivityThresholds,
    ) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description().to_string(),
            category: record.category.clone(),
            ecosystem: record.ecosystem.clone(),
            target_audience: record.target_audience.clone(),
            status: record.status().map(str::to_string),
            readiness: record.readiness_label(),
            activity: record_activity(record, now, thresholds),
            stars: record.github_stars(),
            logo: record.logo().to_string(),
            links: record.web.links(),
            treasury_funded: record.treasury_funded,
            audit: record.audit,
        }
    }
}

impl CatalogView {
    pub(super) fn build(state: &CatalogState, now: OffsetDateTime) -> Self {
        let thresholds = &state.config().activity;
        let cards = state
            .visible()
            .into_iter()
            .map(|record| CardView::from_record(record, now, thresholds))
            .collect();

        let facets = Dimension::ALL
            .into_iter()
            .map(|dimension| FacetView {
                dimension,
                entries: state
                    .facets()
                    .facet(dimension)
                    .entries()
                    .map(|entry| FacetEntryView {
                        value: entry.value.to_string(),
                        count: entry.count,
                        selected: state.filters().is_selected(dimension, entry.value),
                        color: Dimension::COLORED
                            .contains(&dimension)
                            .then(|| state.colors().get(entry.value))
                            .flatten(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            load: state.load_status().clone(),
            summary: state.summary(),
            search: state.search().to_string(),
            sort: state.sort(),
            cards,
            facets,
            category_groups: category_groups(
                state.facets().facet(Dimension::Category),
                &state.config().category_groups,
            ),
        }
    }

    pub fn facet(&self, dimension: Dimension) -> Option<&FacetView> {
        self.facets.iter().find(|facet| facet.dimension == dimension)
    }

    pub fn card_names(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.name.as_str()).collect()
    }
}
