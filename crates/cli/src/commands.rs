#![forbid(unsafe_code)]

use crate::args::{Selection, SortArg, ThemeAction, ThemeArg};
use anyhow::Context;
use eco_core::{
    CatalogConfig, CatalogEvent, CatalogState, ProjectRecord, SortSpec, record_activity,
};
use eco_storage::{PrefsStore, Theme, aggregate_dir, write_dataset};
use serde_json::{Value, json};
use std::path::Path;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub(crate) fn aggregate(data_dir: &Path, out: &Path, now: OffsetDateTime) -> anyhow::Result<Value> {
    let aggregate = aggregate_dir(data_dir)
        .with_context(|| format!("aggregating {}", data_dir.display()))?;
    let skipped = aggregate.skipped;
    let envelope = write_dataset(out, aggregate.records, now)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(json!({
        "out": out.display().to_string(),
        "records": envelope.projects.len(),
        "digest": envelope.digest,
        "generated_at": envelope.generated_at,
        "skipped": skipped,
    }))
}

pub(crate) fn facets(
    config: CatalogConfig,
    records: Vec<ProjectRecord>,
    now: OffsetDateTime,
) -> anyhow::Result<Value> {
    let view = CatalogState::loaded(config, records)?.view(now);
    Ok(json!({
        "total": view.summary.total,
        "facets": view.facets,
        "category_groups": view.category_groups,
    }))
}

#[derive(Debug)]
pub(crate) struct QueryRequest {
    pub selections: Vec<Selection>,
    pub search: String,
    pub sort: SortArg,
    pub descending: bool,
}

#[derive(Debug)]
pub(crate) struct QueryOutcome {
    pub output: Value,
    /// Selections naming a value absent from the dataset.
    pub ignored: Vec<Selection>,
}

pub(crate) fn query(
    config: CatalogConfig,
    records: Vec<ProjectRecord>,
    request: QueryRequest,
    now: OffsetDateTime,
) -> anyhow::Result<QueryOutcome> {
    let mut state = CatalogState::loaded(config, records)?;
    let mut ignored = Vec::new();

    for selection in request.selections {
        if !state.filters().contains(selection.dimension, &selection.value) {
            ignored.push(selection);
            continue;
        }
        if state.filters().is_selected(selection.dimension, &selection.value) {
            continue;
        }
        state = state.apply(CatalogEvent::Toggle {
            dimension: selection.dimension,
            value: selection.value,
        });
    }
    let spec = SortSpec {
        key: request.sort.into(),
        descending: request.descending,
    };
    state = state
        .apply(CatalogEvent::Search(request.search))
        .apply(CatalogEvent::Sort(spec));

    let view = state.view(now);
    let cards = view
        .cards
        .iter()
        .map(|card| {
            json!({
                "name": card.name,
                "status": card.status,
                "readiness": card.readiness,
                "activity": card.activity,
                "activity_label": card.activity.label(),
                "stars": card.stars,
            })
        })
        .collect::<Vec<_>>();

    Ok(QueryOutcome {
        output: json!({
            "visible": view.card_names(),
            "summary": view.summary,
            "label": view.summary.label(),
            "sort": view.sort,
            "cards": cards,
        }),
        ignored,
    })
}

pub(crate) fn activity(
    config: &CatalogConfig,
    records: &[ProjectRecord],
    at: OffsetDateTime,
) -> anyhow::Result<Value> {
    let levels = records
        .iter()
        .map(|record| {
            let level = record_activity(record, at, &config.activity);
            json!({
                "name": record.name,
                "activity": level,
                "label": level.label(),
            })
        })
        .collect::<Vec<_>>();
    Ok(json!({
        "at": at.format(&Rfc3339)?,
        "projects": levels,
    }))
}

pub(crate) fn theme(storage_dir: &Path, action: Option<ThemeAction>) -> anyhow::Result<Value> {
    let mut store = PrefsStore::open(storage_dir)
        .with_context(|| format!("opening preferences in {}", storage_dir.display()))?;
    let theme = match action {
        None | Some(ThemeAction::Get) => store.theme()?,
        Some(ThemeAction::Set { theme }) => {
            let theme = match theme {
                ThemeArg::Light => Theme::Light,
                ThemeArg::Dark => Theme::Dark,
            };
            store.set_theme(theme)?;
            theme
        }
    };
    Ok(json!({ "theme": theme.as_str() }))
}

