#![forbid(unsafe_code)]

use crate::metrics;
use crate::record::{MetricSample, ProjectRecord};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Active,
    Moderate,
    Inactive,
    Unknown,
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Active => "active",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Inactive => "inactive",
            ActivityLevel::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Active => "Active",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::Inactive => "Inactive",
            ActivityLevel::Unknown => "Unknown",
        }
    }
}

/// Inclusive upper bounds, in whole days, for the two fresher levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityThresholds {
    pub active_days: i64,
    pub moderate_days: i64,
}

impl Default for ActivityThresholds {
    fn default() -> Self {
        Self {
            active_days: 90,
            moderate_days: 180,
        }
    }
}

/// Classifies a "last source activity" series (values are epoch seconds) by
/// the age of its final sample.
pub fn classify_activity(
    series: Option<&[MetricSample]>,
    now: OffsetDateTime,
    thresholds: &ActivityThresholds,
) -> ActivityLevel {
    let Some(last) = series.and_then(<[MetricSample]>::last) else {
        return ActivityLevel::Unknown;
    };
    let Some(instant) = last.value.and_then(instant_from_epoch_seconds) else {
        return ActivityLevel::Unknown;
    };

    let days = days_elapsed(instant, now);
    if days <= thresholds.active_days {
        ActivityLevel::Active
    } else if days <= thresholds.moderate_days {
        ActivityLevel::Moderate
    } else {
        ActivityLevel::Inactive
    }
}

pub fn record_activity(
    record: &ProjectRecord,
    now: OffsetDateTime,
    thresholds: &ActivityThresholds,
) -> ActivityLevel {
    classify_activity(record.series(metrics::GITHUB_PUSHED_AT), now, thresholds)
}

/// Whole days from `from` to `to`, floored. Negative when `from` is later.
pub fn days_elapsed(from: OffsetDateTime, to: OffsetDateTime) -> i64 {
    (to - from).whole_seconds().div_euclid(SECONDS_PER_DAY)
}

fn instant_from_epoch_seconds(seconds: u64) -> Option<OffsetDateTime> {
    let seconds = i64::try_from(seconds).ok()?;
    OffsetDateTime::from_unix_timestamp(seconds).ok()
}
