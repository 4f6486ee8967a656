#![forbid(unsafe_code)]

pub mod activity;
pub mod catalog;
pub mod colors;
pub mod config;
pub mod facets;
pub mod filter;
pub mod query;
pub mod record;
pub mod store;

pub use activity::{ActivityLevel, ActivityThresholds, classify_activity, record_activity};
pub use catalog::{CatalogEvent, CatalogState, CatalogView, LoadStatus, LoadTicket};
pub use colors::ColorMap;
pub use config::{CatalogConfig, ConfigError, Rgb};
pub use facets::{Dimension, Facet, FacetIndex};
pub use filter::{FilterState, ToggleError};
pub use query::{FilterSummary, Query};
pub use record::{MetricSample, ProjectRecord};
pub use store::{RecordStore, SortKey, SortSpec};

/// Metric series names. Collectors write the short names; the long
/// spellings are accepted as well.
pub mod metrics {
    pub const GITHUB_STARS: &str = "github";
    pub const GITHUB_PUSHED_AT: &str = "github_pushed_at";
    pub const TWITTER_FOLLOWERS: &str = "twitter";
    pub const DISCORD_MEMBERS: &str = "discord";

    const SPELLINGS: &[&[&str]] = &[
        &[GITHUB_STARS, "github_stars"],
        &[GITHUB_PUSHED_AT, "github_pushed"],
        &[TWITTER_FOLLOWERS, "twitter_followers"],
        &[DISCORD_MEMBERS, "discord_members"],
    ];

    pub const KNOWN: &[&str] = &[
        GITHUB_STARS,
        GITHUB_PUSHED_AT,
        TWITTER_FOLLOWERS,
        DISCORD_MEMBERS,
    ];

    /// Every accepted key for the metric `name` is known under, preferred
    /// spelling first. Empty for unrecognized names.
    pub fn spellings(name: &str) -> &'static [&'static str] {
        let name = name.trim();
        SPELLINGS
            .iter()
            .copied()
            .find(|group| group.iter().any(|key| *key == name))
            .unwrap_or(&[])
    }

    pub fn is_known_metric(name: &str) -> bool {
        !spellings(name).is_empty()
    }
}
