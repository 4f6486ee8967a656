#![forbid(unsafe_code)]

use crate::record::ProjectRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const YES: &str = "yes";
pub const NO: &str = "no";

/// A filterable axis of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Category,
    Status,
    Audience,
    Ecosystem,
    /// Business readiness. Filterable, never colored.
    Business,
    TreasuryFunded,
    Audit,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Category,
        Dimension::Status,
        Dimension::Audience,
        Dimension::Ecosystem,
        Dimension::Business,
        Dimension::TreasuryFunded,
        Dimension::Audit,
    ];

    /// Dimensions whose values receive colors, in color traversal order.
    pub const COLORED: [Dimension; 4] = [
        Dimension::Category,
        Dimension::Status,
        Dimension::Audience,
        Dimension::Ecosystem,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Status => "status",
            Dimension::Audience => "audience",
            Dimension::Ecosystem => "ecosystem",
            Dimension::Business => "business",
            Dimension::TreasuryFunded => "treasury_funded",
            Dimension::Audit => "audit",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "category" => Some(Dimension::Category),
            "status" | "readiness" | "technology" => Some(Dimension::Status),
            "audience" | "target_audience" => Some(Dimension::Audience),
            "ecosystem" => Some(Dimension::Ecosystem),
            "business" | "business_readiness" => Some(Dimension::Business),
            "treasury_funded" | "treasury" => Some(Dimension::TreasuryFunded),
            "audit" | "audited" => Some(Dimension::Audit),
            _ => None,
        }
    }

    /// Single-valued dimensions are matched by exact equality rather than
    /// set intersection.
    pub fn is_single_valued(self) -> bool {
        matches!(
            self,
            Dimension::Status
                | Dimension::Business
                | Dimension::TreasuryFunded
                | Dimension::Audit
        )
    }

    /// The record's values along this dimension. Blank strings and absent
    /// fields contribute nothing.
    pub fn record_values(self, record: &ProjectRecord) -> Vec<&str> {
        match self {
            Dimension::Category => non_blank(&record.category),
            Dimension::Audience => non_blank(&record.target_audience),
            Dimension::Ecosystem => non_blank(&record.ecosystem),
            Dimension::Status => record.status().into_iter().collect(),
            Dimension::Business => record.business_readiness().into_iter().collect(),
            Dimension::TreasuryFunded => flag_value(record.treasury_funded).into_iter().collect(),
            Dimension::Audit => flag_value(record.audit).into_iter().collect(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn non_blank(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .collect()
}

fn flag_value(flag: Option<bool>) -> Option<&'static str> {
    flag.map(|v| if v { YES } else { NO })
}
