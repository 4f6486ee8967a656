#![forbid(unsafe_code)]

use super::Web;
use crate::metrics;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::{BTreeMap, BTreeSet};

/// A single project entry, as authored in one per-project source file.
///
/// Every field except `name` is optional in the source; missing (or `null`)
/// values deserialize to their empty form so that downstream filtering treats
/// them as absent rather than failing the whole dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub target_audience: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub ecosystem: Vec<String>,
    /// Display-only; not a filter dimension.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub layer: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness: Option<Readiness>,
    #[serde(default, deserialize_with = "nullable")]
    pub metrics: BTreeMap<String, Vec<MetricSample>>,
    #[serde(default, deserialize_with = "nullable")]
    pub web: Web,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treasury_funded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Calendar date as written by the collector (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: String,
    /// Anything other than a non-negative integer reads as `None`, so one
    /// bad sample never rejects the record around it.
    #[serde(default, deserialize_with = "lenient_count")]
    pub value: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Count(u64),
    Other(de::IgnoredAny),
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawCount>::deserialize(deserializer)? {
        Some(RawCount::Count(value)) => Some(value),
        Some(RawCount::Other(_)) | None => None,
    })
}

impl MetricSample {
    pub fn new(date: impl Into<String>, value: u64) -> Self {
        Self {
            date: date.into(),
            value: Some(value),
        }
    }
}

impl ProjectRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Technology readiness, used as the `status` facet.
    pub fn status(&self) -> Option<&str> {
        self.readiness
            .as_ref()
            .and_then(|r| r.technology.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn business_readiness(&self) -> Option<&str> {
        self.readiness
            .as_ref()
            .and_then(|r| r.business.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn readiness_label(&self) -> String {
        let mut parts = Vec::new();
        if let Some(tech) = self.status() {
            parts.push(format!("Tech: {tech}"));
        }
        if let Some(business) = self.business_readiness() {
            parts.push(format!("Business: {business}"));
        }
        parts.join(" | ")
    }

    /// The named series, looked up under every accepted spelling of a
    /// well-known metric.
    pub fn series(&self, metric: &str) -> Option<&[MetricSample]> {
        let metric = metric.trim();
        let spellings = metrics::spellings(metric);
        let lookup = |key: &str| {
            self.metrics
                .get(key)
                .map(Vec::as_slice)
                .filter(|s| !s.is_empty())
        };
        if spellings.is_empty() {
            return lookup(metric);
        }
        spellings.iter().find_map(|key| lookup(*key))
    }

    /// Value of the sample with the greatest date; the earliest-listed sample
    /// wins a tie.
    pub fn latest_metric(&self, metric: &str) -> Option<u64> {
        self.series(metric)?
            .iter()
            .rev()
            .max_by(|a, b| a.date.cmp(&b.date))
            .and_then(|sample| sample.value)
    }

    pub fn github_stars(&self) -> Option<u64> {
        self.latest_metric(metrics::GITHUB_STARS)
    }

    pub fn logo(&self) -> &str {
        self.web
            .logo
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_LOGO)
    }

    /// Drops repeated set members (first occurrence kept) and orders every
    /// metric series by date, oldest first. The sort is stable.
    pub fn normalize(&mut self) {
        dedup_in_place(&mut self.category);
        dedup_in_place(&mut self.target_audience);
        dedup_in_place(&mut self.ecosystem);
        dedup_in_place(&mut self.layer);
        for series in self.metrics.values_mut() {
            series.sort_by(|a, b| a.date.cmp(&b.date));
        }
    }
}

pub const DEFAULT_LOGO: &str = "default.png";

fn dedup_in_place(values: &mut Vec<String>) {
    let mut seen = BTreeSet::new();
    values.retain(|value| seen.insert(value.clone()));
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
