#![forbid(unsafe_code)]

use crate::config::CatalogConfig;
use crate::metrics;
use crate::record::ProjectRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    /// Position in the configured readiness order.
    Status,
    Stars,
    /// Last source-activity timestamp.
    Pushed,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Status => "status",
            SortKey::Stars => "stars",
            SortKey::Pushed => "pushed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "status" | "readiness" => Some(SortKey::Status),
            "stars" | "github_stars" => Some(SortKey::Stars),
            "pushed" | "activity" | "github_pushed_at" => Some(SortKey::Pushed),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    #[serde(default)]
    pub descending: bool,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            descending: true,
        }
    }

    /// Absent keys compare lowest. Descending reverses the comparison, not
    /// the sequence, so equal keys keep their prior relative order.
    pub fn compare(
        &self,
        a: &ProjectRecord,
        b: &ProjectRecord,
        config: &CatalogConfig,
    ) -> Ordering {
        let ord = match self.key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Status => status_rank(a, config).cmp(&status_rank(b, config)),
            SortKey::Stars => a.github_stars().cmp(&b.github_stars()),
            SortKey::Pushed => a
                .latest_metric(metrics::GITHUB_PUSHED_AT)
                .cmp(&b.latest_metric(metrics::GITHUB_PUSHED_AT)),
        };
        if self.descending { ord.reverse() } else { ord }
    }
}

/// Readiness rank, higher for more mature statuses. Statuses outside the
/// configured order rank below every configured one and tie-break on their
/// text, so an ascending sort lists them alphabetically and a descending sort
/// reverse-alphabetically.
fn status_rank<'a>(
    record: &'a ProjectRecord,
    config: &CatalogConfig,
) -> Option<(usize, &'a str)> {
    let status = record.status()?;
    let priority = &config.status_priority;
    let rank = priority
        .iter()
        .position(|candidate| candidate == status)
        .unwrap_or(priority.len());
    // Invert so that `None < least mature < ... < most mature`.
    Some((priority.len() - rank, status))
}

/// The canonical, ordered collection of records for one dataset load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<ProjectRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<ProjectRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stable: records with equal keys keep their current relative order.
    pub fn sort_by(&mut self, spec: SortSpec, config: &CatalogConfig) {
        self.records.sort_by(|a, b| spec.compare(a, b, config));
    }
}
