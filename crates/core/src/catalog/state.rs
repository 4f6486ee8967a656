#![forbid(unsafe_code)]

use super::CatalogView;
use crate::colors::ColorMap;
use crate::config::{CatalogConfig, ConfigError};
use crate::facets::{Dimension, FacetIndex};
use crate::filter::FilterState;
use crate::query::{FilterSummary, Query, normalize_search};
use crate::record::ProjectRecord;
use crate::store::{RecordStore, SortSpec};
use serde::Serialize;
use time::OffsetDateTime;

/// Identifies one requested dataset load. Completions carrying an older
/// ticket than the most recently issued one are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Pending,
    Ready,
    Degraded {
        reason: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogEvent {
    Loaded {
        ticket: LoadTicket,
        records: Vec<ProjectRecord>,
    },
    LoadFailed {
        ticket: LoadTicket,
        reason: String,
    },
    Toggle {
        dimension: Dimension,
        value: String,
    },
    ClearFilters,
    Search(String),
    Sort(SortSpec),
}

/// All catalog UI state. Updates go through [`CatalogState::apply`], which
/// consumes the state and returns the next one.
#[derive(Clone, Debug, Default)]
pub struct CatalogState {
    config: CatalogConfig,
    store: RecordStore,
    facets: FacetIndex,
    colors: ColorMap,
    filters: FilterState,
    search: String,
    sort: SortSpec,
    issued: u64,
    load: LoadStatus,
}

impl CatalogState {
    pub fn new(config: CatalogConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// A state with `records` already loaded.
    pub fn loaded(config: CatalogConfig, records: Vec<ProjectRecord>) -> Result<Self, ConfigError> {
        let (state, ticket) = Self::new(config)?.begin_load();
        Ok(state.apply(CatalogEvent::Loaded { ticket, records }))
    }

    pub fn begin_load(mut self) -> (Self, LoadTicket) {
        self.issued += 1;
        self.load = LoadStatus::Pending;
        let ticket = LoadTicket(self.issued);
        (self, ticket)
    }

    pub fn apply(self, event: CatalogEvent) -> Self {
        match event {
            CatalogEvent::Loaded { ticket, records } => {
                if self.is_stale(ticket) {
                    return self;
                }
                self.replace_records(records, LoadStatus::Ready)
            }
            CatalogEvent::LoadFailed { ticket, reason } => {
                if self.is_stale(ticket) {
                    return self;
                }
                tracing::warn!(%reason, "dataset load failed; catalog is empty");
                self.replace_records(Vec::new(), LoadStatus::Degraded { reason })
            }
            CatalogEvent::Toggle { dimension, value } => self.toggle(dimension, &value),
            CatalogEvent::ClearFilters => {
                let mut next = self;
                next.filters.clear();
                next
            }
            CatalogEvent::Search(text) => Self {
                search: text,
                ..self
            },
            CatalogEvent::Sort(spec) => {
                let mut next = self;
                next.sort = spec;
                next.store.sort_by(spec, &next.config);
                next
            }
        }
    }

    pub fn on_load(
        self,
        ticket: LoadTicket,
        records: Vec<ProjectRecord>,
        now: OffsetDateTime,
    ) -> (Self, CatalogView) {
        self.dispatch(CatalogEvent::Loaded { ticket, records }, now)
    }

    pub fn on_toggle(
        self,
        dimension: Dimension,
        value: impl Into<String>,
        now: OffsetDateTime,
    ) -> (Self, CatalogView) {
        let value = value.into();
        self.dispatch(CatalogEvent::Toggle { dimension, value }, now)
    }

    pub fn on_search(self, text: impl Into<String>, now: OffsetDateTime) -> (Self, CatalogView) {
        self.dispatch(CatalogEvent::Search(text.into()), now)
    }

    pub fn on_sort(self, spec: SortSpec, now: OffsetDateTime) -> (Self, CatalogView) {
        self.dispatch(CatalogEvent::Sort(spec), now)
    }

    pub fn dispatch(self, event: CatalogEvent, now: OffsetDateTime) -> (Self, CatalogView) {
        let next = self.apply(event);
        let view = next.view(now);
        (next, view)
    }

    pub fn visible(&self) -> Vec<&ProjectRecord> {
        Query::new(&self.filters, &self.search).run(self.store.records())
    }

    pub fn summary(&self) -> FilterSummary {
        let query = Query::new(&self.filters, &self.search);
        FilterSummary {
            visible: query.run(self.store.records()).len(),
            total: self.store.len(),
            active_filters: self.filters.active_count(),
            searching: normalize_search(&self.search).is_some(),
        }
    }

    pub fn view(&self, now: OffsetDateTime) -> CatalogView {
        CatalogView::build(self, now)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn facets(&self) -> &FacetIndex {
        &self.facets
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load
    }

    fn is_stale(&self, ticket: LoadTicket) -> bool {
        if ticket.0 == self.issued {
            return false;
        }
        tracing::debug!(
            ticket = ticket.0,
            latest = self.issued,
            "ignoring superseded dataset load"
        );
        true
    }

    /// Full replace: facets, colors and filters are all rebuilt together and
    /// prior selections are discarded.
    fn replace_records(mut self, records: Vec<ProjectRecord>, load: LoadStatus) -> Self {
        let mut store = RecordStore::new(records);
        store.sort_by(self.sort, &self.config);
        let facets = FacetIndex::build(store.records(), &self.config);
        let colors = ColorMap::assign(&facets, &self.config.palette);
        let filters = FilterState::seeded(&facets);
        tracing::debug!(
            records = store.len(),
            colors = colors.len(),
            "catalog dataset replaced"
        );
        self.store = store;
        self.facets = facets;
        self.colors = colors;
        self.filters = filters;
        self.load = load;
        self
    }

    fn toggle(mut self, dimension: Dimension, value: &str) -> Self {
        if let Err(err) = self.filters.try_toggle(dimension, value) {
            tracing::debug!(code = err.code(), %err, "toggle ignored");
        }
        self
    }
}
