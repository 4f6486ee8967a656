#![forbid(unsafe_code)]

use crate::activity::ActivityThresholds;
use crate::facets::Dimension;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Static tables that shape facet derivation and card rendering.
///
/// Every field has a built-in default, so a partial YAML/JSON document only
/// overrides what it names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Only these ecosystem values become facet entries; their order is also
    /// the ecosystem display priority.
    pub ecosystem_allow_list: Vec<String>,
    /// Technology readiness values, most mature first.
    pub status_priority: Vec<String>,
    pub audience_priority: Vec<String>,
    pub category_groups: Vec<CategoryGroupSpec>,
    pub palette: Vec<Rgb>,
    pub activity: ActivityThresholds,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroupSpec {
    pub name: String,
    pub members: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            ecosystem_allow_list: strings(DEFAULT_ECOSYSTEMS),
            status_priority: strings(DEFAULT_STATUS_PRIORITY),
            audience_priority: strings(DEFAULT_AUDIENCE_PRIORITY),
            category_groups: DEFAULT_CATEGORY_GROUPS
                .iter()
                .map(|(name, members)| CategoryGroupSpec {
                    name: (*name).to_string(),
                    members: strings(members),
                })
                .collect(),
            palette: DEFAULT_PALETTE
                .iter()
                .map(|&(r, g, b)| Rgb(r, g, b))
                .collect(),
            activity: ActivityThresholds::default(),
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let ActivityThresholds {
            active_days,
            moderate_days,
        } = self.activity;
        if active_days < 0 || moderate_days < active_days {
            return Err(ConfigError::InvalidThresholds {
                active_days,
                moderate_days,
            });
        }
        Ok(())
    }

    pub fn allows_ecosystem(&self, value: &str) -> bool {
        self.ecosystem_allow_list.iter().any(|v| v == value)
    }

    /// Explicit display priority for a dimension; empty means alphabetical.
    pub fn priority(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Category => &[],
            Dimension::Status => &self.status_priority,
            Dimension::Audience => &self.audience_priority,
            Dimension::Ecosystem => &self.ecosystem_allow_list,
            Dimension::Business | Dimension::TreasuryFunded | Dimension::Audit => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("activity thresholds must satisfy 0 <= active ({active_days}) <= moderate ({moderate_days})")]
    InvalidThresholds { active_days: i64, moderate_days: i64 },
    #[error("invalid color {0:?}: expected \"r, g, b\" with 0-255 components")]
    InvalidColor(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyPalette => "EMPTY_PALETTE",
            Self::InvalidThresholds { .. } => "INVALID_THRESHOLDS",
            Self::InvalidColor(_) => "INVALID_COLOR",
        }
    }
}

/// An RGB triple, rendered as `"r, g, b"` so it drops straight into
/// `rgb(...)` / `rgba(..., a)` in the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(raw.to_string());
        let parts = raw
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        match parts.as_slice() {
            [r, g, b] => Ok(Rgb(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

const DEFAULT_ECOSYSTEMS: &[&str] = &["Polkadot", "Kusama"];

const DEFAULT_STATUS_PRIORITY: &[&str] = &[
    "Production",
    "Beta",
    "Alpha",
    "Testnet",
    "Prototype",
    "Concept",
    "Discontinued",
];

const DEFAULT_AUDIENCE_PRIORITY: &[&str] = &["Developers", "Users", "Institutions"];

const DEFAULT_CATEGORY_GROUPS: &[(&str, &[&str])] = &[
    (
        "Infrastructure",
        &[
            "Infrastructure",
            "Parachain",
            "Bridge",
            "Oracle",
            "Indexer",
            "Storage",
            "Identity",
            "Privacy",
            "Developer Tools",
            "Wallet",
        ],
    ),
    (
        "Finance & Markets",
        &[
            "DeFi",
            "DEX",
            "Lending",
            "Stablecoin",
            "Staking",
            "Payments",
            "Exchange",
        ],
    ),
    (
        "Community & Culture",
        &["NFT", "Gaming", "Social", "DAO", "Governance", "Education", "Media"],
    ),
];

const DEFAULT_PALETTE: &[(u8, u8, u8)] = &[
    (230, 0, 122),
    (59, 130, 246),
    (34, 197, 94),
    (249, 115, 22),
    (139, 92, 246),
    (20, 184, 166),
    (239, 68, 68),
    (234, 179, 8),
    (14, 165, 233),
    (236, 72, 153),
    (132, 204, 22),
    (99, 102, 241),
    (245, 158, 11),
    (16, 185, 129),
    (168, 85, 247),
    (6, 182, 212),
    (244, 63, 94),
    (217, 70, 239),
    (100, 116, 139),
    (120, 113, 108),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        CatalogConfig::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_empty_palette_and_inverted_thresholds() {
        let mut config = CatalogConfig {
            palette: Vec::new(),
            ..CatalogConfig::default()
        };
        assert_eq!(config.validate().unwrap_err(), ConfigError::EmptyPalette);

        config = CatalogConfig::default();
        config.activity = ActivityThresholds {
            active_days: 200,
            moderate_days: 100,
        };
        assert_eq!(config.validate().unwrap_err().code(), "INVALID_THRESHOLDS");
    }

    #[test]
    fn rgb_round_trips_through_its_string_form() {
        let rgb: Rgb = " 230,0 , 122".parse().unwrap();
        assert_eq!(rgb, Rgb(230, 0, 122));
        assert_eq!(rgb.to_string(), "230, 0, 122");
        assert!("1, 2".parse::<Rgb>().is_err());
        assert!("1, 2, 300".parse::<Rgb>().is_err());
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config: CatalogConfig =
            serde_json::from_str(r#"{"ecosystem_allow_list":["Polkadot"]}"#).unwrap();
        assert_eq!(config.ecosystem_allow_list, vec!["Polkadot".to_string()]);
        assert_eq!(config.palette, CatalogConfig::default().palette);
        assert_eq!(config.activity.active_days, 90);
    }
}
